//! Message thread handlers.
//!
//! ```text
//! GET  /ideas/{id}/messages
//! POST /ideas/{id}/messages  {"role":"user","content":"hello"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::message::{Message, MessageRole};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_uuid, require_text};

/// Response body for `GET /ideas/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    /// The thread, ascending by creation time.
    pub messages: Vec<Message>,
}

/// Request body for `POST /ideas/{id}/messages`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostMessageRequest {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Response body for `POST /ideas/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageResponse {
    /// The stored reply from the chat model.
    pub assistant_message: Message,
}

/// List an idea's thread.
#[utoipa::path(
    get,
    path = "/ideas/{id}/messages",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Messages, ascending by creation time", body = MessagesResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["messages"],
    operation_id = "listMessages"
)]
#[get("/ideas/{id}/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessagesResponse>> {
    let idea_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let messages = state.thread.list_messages(idea_id).await?;
    Ok(web::Json(MessagesResponse { messages }))
}

/// Post a turn and return the model's reply.
#[utoipa::path(
    post,
    path = "/ideas/{id}/messages",
    params(("id" = String, Path, description = "Idea identifier")),
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Reply persisted", body = PostMessageResponse),
        (status = 400, description = "Missing role or content", body = crate::domain::Error),
        (status = 500, description = "Chat model call failed", body = crate::domain::Error)
    ),
    tags = ["messages"],
    operation_id = "postMessage"
)]
#[post("/ideas/{id}/messages")]
pub async fn post_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PostMessageRequest>,
) -> ApiResult<web::Json<PostMessageResponse>> {
    let idea_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let PostMessageRequest { role, content } = payload.into_inner();
    let role_field = FieldName::new("role");
    let role_raw = require_text(role, role_field)?;
    let role = MessageRole::parse(&role_raw).ok_or_else(|| {
        invalid_value_error(role_field, "role must be one of user, assistant, or system")
    })?;
    let content = require_text(content, FieldName::new("content"))?;

    if let Some(subject) = session.subject() {
        debug!(user = %subject.email, idea_id = %idea_id, "posting message");
    }
    let assistant_message = state.thread.post_message(idea_id, role, content).await?;
    Ok(web::Json(PostMessageResponse { assistant_message }))
}
