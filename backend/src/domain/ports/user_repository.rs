//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{NewUserAccount, UserAccount};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// The email address is already registered.
    #[error("email address is already registered")]
    DuplicateEmail,
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
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

/// Datastore access for account records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return the stored record.
    async fn insert(&self, account: NewUserAccount) -> Result<UserAccount, UserPersistenceError>;

    /// Fetch an account by email address.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}
