//! Port abstraction for message persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::message::{Message, MessageRole};

/// Fields required to append a message to a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub idea_id: Uuid,
    pub role: MessageRole,
    pub content: String,
}

/// Persistence errors raised by message repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessagePersistenceError {
    /// Repository connection could not be established.
    #[error("message store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("message store query failed: {message}")]
    Query { message: String },
}

impl MessagePersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Datastore access for message records. Append-only.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message and return the stored record.
    async fn insert(&self, message: NewMessage) -> Result<Message, MessagePersistenceError>;

    /// All messages for an idea, ascending by creation time. An unknown idea
    /// yields an empty list.
    async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<Message>, MessagePersistenceError>;

    /// The most recent `limit` messages for an idea, still ascending by
    /// creation time.
    async fn recent_for_idea(
        &self,
        idea_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, MessagePersistenceError>;

    /// Bulk-delete an idea's messages, returning the number removed.
    async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, MessagePersistenceError>;
}
