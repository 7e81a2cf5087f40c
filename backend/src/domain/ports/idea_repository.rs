//! Port abstraction for idea persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::idea::{Idea, IdeaDraft};

/// Persistence errors raised by idea repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaPersistenceError {
    /// Repository connection could not be established.
    #[error("idea store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("idea store query failed: {message}")]
    Query { message: String },
}

impl IdeaPersistenceError {
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

/// Datastore access for idea records.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Insert a new idea and return the stored record.
    async fn insert(&self, draft: IdeaDraft) -> Result<Idea, IdeaPersistenceError>;

    /// List all ideas, newest first.
    async fn list(&self) -> Result<Vec<Idea>, IdeaPersistenceError>;

    /// Fetch an idea by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError>;

    /// Delete an idea row, returning the number of rows removed.
    ///
    /// Dependent messages and tasks are deleted by the idea service before
    /// this call, not here.
    async fn delete(&self, id: Uuid) -> Result<u64, IdeaPersistenceError>;
}
