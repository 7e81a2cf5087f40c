//! Use-case port for the per-idea message thread.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::message::{Message, MessageRole};

/// Message thread operations exposed to the HTTP layer.
#[async_trait]
pub trait MessageThread: Send + Sync {
    /// All messages for an idea, ascending by creation time. An idea with no
    /// messages (or an unknown id) yields an empty list.
    async fn list_messages(&self, idea_id: Uuid) -> Result<Vec<Message>, Error>;

    /// Persist an incoming turn, relay the bounded thread history to the
    /// chat model, persist the reply, and return the stored assistant
    /// message. The incoming turn stays persisted even when the relay fails.
    async fn post_message(
        &self,
        idea_id: Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<Message, Error>;
}
