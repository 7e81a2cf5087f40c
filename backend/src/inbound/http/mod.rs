//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod ideas;
pub mod messages;
pub mod session;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use error::ApiResult;

/// Minimal acknowledgement body for operations with nothing else to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AckResponse {
    /// Always `true` on success.
    pub ok: bool,
}

impl AckResponse {
    /// The affirmative acknowledgement.
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}
