//! Task listing and generation handlers.
//!
//! ```text
//! GET  /ideas/{id}/generate-tasks
//! POST /ideas/{id}/generate-tasks  {"numTasks":5}
//! ```
//!
//! The GET/POST pair are distinct operations: GET lists what is persisted,
//! POST appends a freshly generated batch. Nothing replaces earlier batches.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::DEFAULT_NUM_TASKS;
use crate::domain::task::Task;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Response body for `GET /ideas/{id}/generate-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TasksResponse {
    /// Persisted tasks, ascending by creation time.
    pub tasks: Vec<Task>,
}

/// Request body for `POST /ideas/{id}/generate-tasks`. The body as a whole
/// is optional; an absent or unreadable body means the default batch size.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksRequest {
    pub num_tasks: Option<u32>,
}

/// Response body for `POST /ideas/{id}/generate-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksResponse {
    /// The persisted batch, in the order the model emitted it.
    pub tasks: Vec<Task>,
    /// The provider's raw payload, for diagnostics.
    #[schema(value_type = Object)]
    pub raw_model: Value,
}

/// List an idea's persisted tasks.
#[utoipa::path(
    get,
    path = "/ideas/{id}/generate-tasks",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Tasks, ascending by creation time", body = TasksResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/ideas/{id}/generate-tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TasksResponse>> {
    let idea_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let tasks = state.tasks.list_tasks(idea_id).await?;
    Ok(web::Json(TasksResponse { tasks }))
}

/// Generate and persist a new batch of tasks for an idea.
#[utoipa::path(
    post,
    path = "/ideas/{id}/generate-tasks",
    params(("id" = String, Path, description = "Idea identifier")),
    request_body = GenerateTasksRequest,
    responses(
        (status = 200, description = "Generated batch", body = GenerateTasksResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Idea not found", body = crate::domain::Error),
        (status = 500, description = "Model call, parse, or shape failure", body = crate::domain::Error)
    ),
    tags = ["tasks"],
    operation_id = "generateTasks"
)]
#[post("/ideas/{id}/generate-tasks")]
pub async fn generate_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<GenerateTasksRequest>>,
) -> ApiResult<web::Json<GenerateTasksResponse>> {
    let idea_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let num_tasks = payload
        .and_then(|body| body.into_inner().num_tasks)
        .unwrap_or(DEFAULT_NUM_TASKS);

    if let Some(subject) = session.subject() {
        debug!(user = %subject.email, idea_id = %idea_id, num_tasks, "generating tasks");
    }
    let generated = state.tasks.generate_tasks(idea_id, num_tasks).await?;
    Ok(web::Json(GenerateTasksResponse {
        tasks: generated.tasks,
        raw_model: generated.raw_model,
    }))
}
