//! Environment-driven process configuration.
//!
//! All configuration is read once at startup and immutable afterwards; the
//! only per-request override anywhere is the model identifier on a relay
//! call.

use std::env;
use std::net::SocketAddr;

use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::outbound::openrouter::{DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};

/// Bind address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Failures while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("{name} is not set")]
    MissingVar { name: &'static str },
    /// An environment variable is present but unusable.
    #[error("{name} is invalid: {message}")]
    InvalidVar { name: &'static str, message: String },
}

impl ConfigError {
    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidVar {
            name,
            message: message.into(),
        }
    }
}

/// Process-wide configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// HTTP bind address (`BIND_ADDR`, default `0.0.0.0:8080`).
    pub bind_addr: SocketAddr,
    /// Chat-completions endpoint (`OPENROUTER_ENDPOINT` override).
    pub chat_endpoint: Url,
    /// API credential (`OPENROUTER_API_KEY`). May be absent; relay calls
    /// then fail with a configuration error before any network I/O.
    pub chat_api_key: Option<String>,
    /// Default model identifier (`OPENROUTER_MODEL` override).
    pub chat_model: String,
    /// Session token signing secret (`JWT_SECRET`).
    pub token_secret: String,
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar {
                name: "DATABASE_URL",
            })?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", err.to_string()))?;

        let chat_endpoint = env::var("OPENROUTER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_CHAT_ENDPOINT.to_owned());
        let chat_endpoint = Url::parse(&chat_endpoint)
            .map_err(|err| ConfigError::invalid("OPENROUTER_ENDPOINT", err.to_string()))?;

        let chat_api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let chat_model =
            env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_owned());

        Ok(Self {
            database_url,
            bind_addr,
            chat_endpoint,
            chat_api_key,
            chat_model,
            token_secret: token_secret_from_env()?,
        })
    }
}

/// `JWT_SECRET`, or an ephemeral secret in debug builds (or when
/// `JWT_ALLOW_EPHEMERAL=1`). An ephemeral secret invalidates every issued
/// token on restart, so release builds refuse to run without the real one.
fn token_secret_from_env() -> Result<String, ConfigError> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ => {
            let allow_dev = env::var("JWT_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!("using ephemeral token signing secret (dev only)");
                Ok(Uuid::new_v4().to_string())
            } else {
                Err(ConfigError::MissingVar { name: "JWT_SECRET" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_variable() {
        let missing = ConfigError::MissingVar {
            name: "DATABASE_URL",
        };
        assert_eq!(missing.to_string(), "DATABASE_URL is not set");

        let invalid = ConfigError::invalid("BIND_ADDR", "invalid socket address");
        assert!(invalid.to_string().contains("BIND_ADDR"));
        assert!(invalid.to_string().contains("invalid socket address"));
    }

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().expect("default parses");
        assert_eq!(addr.port(), 8080);
    }
}
