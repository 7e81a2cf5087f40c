//! Idea CRUD handlers.
//!
//! ```text
//! GET    /ideas
//! POST   /ideas       {"title":"…","description":"…","tags":["x","y"]}
//! DELETE /ideas       {"id":"…"}
//! GET    /ideas/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::idea::{Idea, IdeaDraft};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require_text};
use crate::inbound::http::{AckResponse, ApiResult};

/// Request body for `POST /ideas`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Optional ordered labels; omitted means none.
    pub tags: Option<Vec<String>>,
}

/// Response body for `POST /ideas`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaCreatedResponse {
    /// The stored idea.
    pub idea: Idea,
}

/// Request body for `DELETE /ideas`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteIdeaRequest {
    pub id: Option<String>,
}

/// List all ideas, newest first.
#[utoipa::path(
    get,
    path = "/ideas",
    responses(
        (status = 200, description = "Ideas, descending by creation time", body = [Idea]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "listIdeas"
)]
#[get("/ideas")]
pub async fn list_ideas(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Idea>>> {
    let ideas = state.ideas.list_ideas().await?;
    Ok(web::Json(ideas))
}

/// Create an idea.
#[utoipa::path(
    post,
    path = "/ideas",
    request_body = CreateIdeaRequest,
    responses(
        (status = 201, description = "Idea created", body = IdeaCreatedResponse),
        (status = 400, description = "Missing title or description", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("/ideas")]
pub async fn create_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIdeaRequest>,
) -> ApiResult<HttpResponse> {
    let CreateIdeaRequest {
        title,
        description,
        tags,
    } = payload.into_inner();
    let title = require_text(title, FieldName::new("title"))?;
    let description = require_text(description, FieldName::new("description"))?;
    let draft = IdeaDraft::new(title, description, tags.unwrap_or_default())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let idea = state.ideas.create_idea(draft).await?;
    if let Some(subject) = session.subject() {
        debug!(user = %subject.email, idea_id = %idea.id, "idea created");
    }
    Ok(HttpResponse::Created().json(IdeaCreatedResponse { idea }))
}

/// Delete an idea and everything it owns.
#[utoipa::path(
    delete,
    path = "/ideas",
    request_body = DeleteIdeaRequest,
    responses(
        (status = 200, description = "Idea, messages, and tasks removed", body = AckResponse),
        (status = 400, description = "Missing or invalid id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "deleteIdea"
)]
#[delete("/ideas")]
pub async fn delete_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DeleteIdeaRequest>,
) -> ApiResult<web::Json<AckResponse>> {
    let field = FieldName::new("id");
    let raw = require_text(payload.into_inner().id, field)?;
    let id = parse_uuid(&raw, field)?;

    state.ideas.delete_idea(id).await?;
    if let Some(subject) = session.subject() {
        debug!(user = %subject.email, idea_id = %id, "idea deleted");
    }
    Ok(web::Json(AckResponse::ok()))
}

/// Fetch a single idea.
#[utoipa::path(
    get,
    path = "/ideas/{id}",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "The idea", body = Idea),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Idea not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "getIdea"
)]
#[get("/ideas/{id}")]
pub async fn get_idea(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Idea>> {
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let idea = state.ideas.get_idea(id).await?;
    Ok(web::Json(idea))
}
