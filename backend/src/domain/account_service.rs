//! Credential store: signup and login over the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Error;
use crate::domain::auth::{AuthTokens, hash_password, verify_password};
use crate::domain::ports::{
    AccountService, LoginOutcome, Signup, UserPersistenceError, UserRepository,
};
use crate::domain::user::NewUserAccount;

/// One message for both unknown email and wrong password, so the response
/// does not reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// [`AccountService`] implementation backed by a user repository and the
/// token codec.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<AuthTokens>,
}

impl CredentialService {
    /// Create a service over the given repository and token codec.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<AuthTokens>) -> Self {
        Self { users, tokens }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::conflict("User exists"),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}

#[async_trait]
impl AccountService for CredentialService {
    async fn sign_up(&self, signup: Signup) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(signup.email.as_ref())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict("User exists"));
        }

        let password_hash =
            hash_password(&signup.password).map_err(|err| Error::internal(err.to_string()))?;
        let account = self
            .users
            .insert(NewUserAccount {
                name: signup.name,
                email: signup.email,
                password_hash,
            })
            .await
            .map_err(map_persistence_error)?;
        debug!(user_id = %account.id, "account created");
        Ok(())
    }

    async fn log_in(&self, email: &str, password: &str) -> Result<LoginOutcome, Error> {
        let account = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = verify_password(password, &account.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(account.id, account.email.as_ref())
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(LoginOutcome {
            token,
            user: account.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::auth::hash_password;
    use crate::domain::user::{Email, UserAccount};
    use chrono::Utc;
    use uuid::Uuid;

    #[derive(Default)]
    struct StubState {
        accounts: Vec<UserAccount>,
        fail_with: Option<UserPersistenceError>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_account(account: UserAccount) -> Self {
            Self {
                state: Mutex::new(StubState {
                    accounts: vec![account],
                    fail_with: None,
                }),
            }
        }

        fn set_failure(&self, failure: UserPersistenceError) {
            self.state.lock().expect("state lock").fail_with = Some(failure);
        }

        fn stored(&self) -> Vec<UserAccount> {
            self.state.lock().expect("state lock").accounts.clone()
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(
            &self,
            account: NewUserAccount,
        ) -> Result<UserAccount, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.fail_with.clone() {
                return Err(failure);
            }
            if state
                .accounts
                .iter()
                .any(|existing| existing.email == account.email)
            {
                return Err(UserPersistenceError::DuplicateEmail);
            }
            let stored = UserAccount {
                id: Uuid::new_v4(),
                name: account.name,
                email: account.email,
                password_hash: account.password_hash,
                created_at: Utc::now(),
            };
            state.accounts.push(stored.clone());
            Ok(stored)
        }

        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<UserAccount>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.fail_with.clone() {
                return Err(failure);
            }
            Ok(state
                .accounts
                .iter()
                .find(|account| account.email.as_ref() == email)
                .cloned())
        }
    }

    fn service(users: Arc<StubUserRepository>) -> CredentialService {
        CredentialService::new(users, Arc::new(AuthTokens::new("test-secret")))
    }

    fn signup(email: &str) -> Signup {
        Signup {
            name: "Ada".into(),
            email: Email::new(email).expect("valid email"),
            password: "s3cret".into(),
        }
    }

    fn existing_account(email: &str, password: &str) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: Email::new(email).expect("valid email"),
            password_hash: hash_password(password).expect("hash"),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sign_up_stores_a_hashed_password() {
        let users = Arc::new(StubUserRepository::default());
        service(users.clone())
            .sign_up(signup("ada@example.com"))
            .await
            .expect("signup succeeds");

        let stored = users.stored();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].password_hash, "s3cret");
        assert!(verify_password("s3cret", &stored[0].password_hash).expect("verify"));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_creates_nothing_new() {
        let users = Arc::new(StubUserRepository::with_account(existing_account(
            "ada@example.com",
            "s3cret",
        )));
        let err = service(users.clone())
            .sign_up(signup("ada@example.com"))
            .await
            .expect_err("duplicate email");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(users.stored().len(), 1);
    }

    #[tokio::test]
    async fn log_in_returns_token_decoding_to_the_account() {
        let account = existing_account("ada@example.com", "s3cret");
        let users = Arc::new(StubUserRepository::with_account(account.clone()));
        let tokens = Arc::new(AuthTokens::new("test-secret"));
        let service = CredentialService::new(users, tokens.clone());

        let outcome = service
            .log_in("ada@example.com", "s3cret")
            .await
            .expect("login succeeds");

        assert_eq!(outcome.user, account.profile());
        let claims = tokens.verify(&outcome.token).expect("verify token");
        assert_eq!(claims.id, account.id.to_string());
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_identically() {
        let users = Arc::new(StubUserRepository::with_account(existing_account(
            "ada@example.com",
            "s3cret",
        )));
        let service = service(users);

        let wrong_password = service
            .log_in("ada@example.com", "nope")
            .await
            .expect_err("wrong password");
        let unknown_email = service
            .log_in("ghost@example.com", "s3cret")
            .await
            .expect_err("unknown email");

        assert_eq!(wrong_password.code, ErrorCode::Unauthorized);
        assert_eq!(unknown_email.code, ErrorCode::Unauthorized);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn repository_failures_map_to_internal_errors() {
        let users = Arc::new(StubUserRepository::default());
        users.set_failure(UserPersistenceError::connection("database unavailable"));
        let err = service(users)
            .log_in("ada@example.com", "s3cret")
            .await
            .expect_err("repository failure");
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
