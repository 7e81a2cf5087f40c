//! User account data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    MissingAtSign,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::MissingAtSign => write!(f, "email must contain an @ sign"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Account email address, trimmed and minimally validated.
///
/// The datastore enforces uniqueness; this type only rejects values that can
/// never be an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from borrowed input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailValidationError::MissingAtSign);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        let Email(raw) = value;
        raw
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored account record, including the password hash.
///
/// Never serialized to clients; the public shape is [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Client-facing projection of the account.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.to_string(),
            name: self.name.clone(),
        }
    }
}

/// Fields required to create an account. The password is already hashed by
/// the time this struct exists.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}

/// Public account shape returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    pub id: Uuid,
    /// Account email address.
    pub email: String,
    /// Display name chosen at signup.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", Ok(()))]
    #[case("  ada@example.com  ", Ok(()))]
    #[case("", Err(EmailValidationError::Empty))]
    #[case("   ", Err(EmailValidationError::Empty))]
    #[case("not-an-address", Err(EmailValidationError::MissingAtSign))]
    fn email_validation(#[case] raw: &str, #[case] expected: Result<(), EmailValidationError>) {
        match (Email::new(raw), expected) {
            (Ok(email), Ok(())) => assert_eq!(email.as_ref(), raw.trim()),
            (Err(err), Err(expected_err)) => assert_eq!(err, expected_err),
            (got, want) => panic!("mismatch: got {got:?}, want {want:?}"),
        }
    }

    #[test]
    fn profile_drops_password_hash() {
        let account = UserAccount {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: Email::new("ada@example.com").expect("valid email"),
            password_hash: "$2b$10$abc".into(),
            created_at: Utc::now(),
        };
        let profile = account.profile();
        assert_eq!(profile.id, account.id);
        assert_eq!(profile.email, "ada@example.com");
        let json = serde_json::to_string(&profile).expect("serialise profile");
        assert!(!json.contains("password"));
    }
}
