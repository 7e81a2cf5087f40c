//! Port abstraction for task persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::task::{Task, TaskDraft};

/// Persistence errors raised by task repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskPersistenceError {
    /// Repository connection could not be established.
    #[error("task store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("task store query failed: {message}")]
    Query { message: String },
}

impl TaskPersistenceError {
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

/// Datastore access for task records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a generated batch in one atomic statement, preserving the
    /// order of `drafts` in the returned records.
    async fn insert_batch(
        &self,
        idea_id: Uuid,
        drafts: Vec<TaskDraft>,
    ) -> Result<Vec<Task>, TaskPersistenceError>;

    /// All tasks for an idea, ascending by creation time. An unknown idea
    /// yields an empty list.
    async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Bulk-delete an idea's tasks, returning the number removed.
    async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, TaskPersistenceError>;
}
