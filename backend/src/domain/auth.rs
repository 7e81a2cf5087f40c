//! Credential hashing and signed session tokens.
//!
//! Passwords are hashed with bcrypt; session tokens are HS256 JWTs carrying
//! the account id and email, valid for seven days. Both primitives are used,
//! not implemented, here.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued session token stays valid.
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// Bcrypt work factor used for new password hashes.
const PASSWORD_HASH_COST: u32 = 10;

/// Failures from the password hashing primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// Hashing or verification could not run, e.g. a malformed stored hash.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

impl PasswordError {
    fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, PASSWORD_HASH_COST).map_err(|err| PasswordError::hash(err.to_string()))
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, password_hash).map_err(|err| PasswordError::hash(err.to_string()))
}

/// Failures from token issuance or verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("token signing failed: {message}")]
    Sign { message: String },
    /// The token is malformed, tampered with, or expired.
    #[error("token rejected: {message}")]
    Invalid { message: String },
}

impl TokenError {
    fn sign(message: impl Into<String>) -> Self {
        Self::Sign {
            message: message.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account identifier, as a UUID string.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens with a fixed validity window.
#[derive(Clone)]
pub struct AuthTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl AuthTokens {
    /// Build a codec for the given signing secret with the standard validity.
    pub fn new(secret: &str) -> Self {
        Self::with_validity(secret, Duration::days(TOKEN_VALIDITY_DAYS))
    }

    /// Build a codec with an explicit validity window.
    pub fn with_validity(secret: &str, validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity,
        }
    }

    /// Sign a token for the given account.
    pub fn issue(&self, id: Uuid, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            id: id.to_string(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenError::sign(err.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| TokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("s3cret").expect("hashing succeeds");
        assert!(verify_password("s3cret", &hash).expect("verification runs"));
        assert!(!verify_password("wrong", &hash).expect("verification runs"));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        let err = verify_password("s3cret", "not-a-bcrypt-hash").expect_err("malformed hash");
        assert!(matches!(err, PasswordError::Hash { .. }));
    }

    #[test]
    fn token_round_trips_claims() {
        let tokens = AuthTokens::new("test-secret");
        let id = Uuid::new_v4();
        let token = tokens.issue(id, "ada@example.com").expect("issue token");
        let claims = tokens.verify(&token).expect("verify token");
        assert_eq!(claims.id, id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = AuthTokens::new("secret-a");
        let verifier = AuthTokens::new("secret-b");
        let token = issuer
            .issue(Uuid::new_v4(), "ada@example.com")
            .expect("issue token");
        let err = verifier.verify(&token).expect_err("wrong secret");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = AuthTokens::with_validity("test-secret", Duration::seconds(-120));
        let token = tokens
            .issue(Uuid::new_v4(), "ada@example.com")
            .expect("issue token");
        let err = tokens.verify(&token).expect_err("expired token");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = AuthTokens::new("test-secret");
        assert!(tokens.verify("not.a.token").is_err());
    }
}
