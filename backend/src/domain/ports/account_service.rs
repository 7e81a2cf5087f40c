//! Use-case port for account signup and login.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::user::{Email, UserProfile};

/// Validated signup request. The password is still plaintext here; the
/// service hashes it before anything is persisted.
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: Email,
    pub password: String,
}

/// Successful login: a signed session token plus the public account shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// Account operations exposed to the HTTP layer.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Fails with a conflict error when the email is
    /// already registered.
    async fn sign_up(&self, signup: Signup) -> Result<(), Error>;

    /// Verify credentials and issue a session token. Unknown emails and
    /// wrong passwords fail identically.
    async fn log_in(&self, email: &str, password: &str) -> Result<LoginOutcome, Error>;
}
