//! Message thread data model.
//!
//! Messages are append-only and ordered ascending by creation time. They are
//! never updated or individually deleted; the only removal path is the
//! cascade when their idea is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Author role of a message turn.
///
/// The application only ever writes `user` and `assistant`; `system` is
/// admitted by the data model but reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Parse a role from its wire representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Wire representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// Persisted message turn belonging to one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: Uuid,
    /// Owning idea.
    pub idea_id: Uuid,
    /// Author role of this turn.
    pub role: MessageRole,
    /// Message body.
    pub content: String,
    /// Record creation timestamp; orders the thread.
    pub created_at: DateTime<Utc>,
}
