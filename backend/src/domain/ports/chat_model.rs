//! Port abstraction for the external chat-completion relay.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Error;
use crate::domain::chat::{ChatOptions, ChatReply, ChatTurn};

/// Failures raised by relay adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatModelError {
    /// No API credential is configured. Raised before any network I/O.
    #[error("chat model API credential is not configured")]
    Configuration,
    /// The provider answered with a non-success status.
    #[error("chat model returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The request never produced a provider response.
    #[error("chat model request failed: {message}")]
    Transport { message: String },
}

impl ChatModelError {
    /// Create an upstream error carrying the provider's status and raw body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<ChatModelError> for Error {
    fn from(error: ChatModelError) -> Self {
        match error {
            ChatModelError::Configuration => Error::internal(error.to_string()),
            ChatModelError::Upstream { status, body } => {
                Error::upstream("chat model call failed")
                    .with_details(json!({ "status": status, "body": body_preview(&body) }))
            }
            ChatModelError::Transport { message } => Error::upstream(message),
        }
    }
}

/// First few hundred characters of a provider body, whitespace-collapsed,
/// for error details that must stay log-sized.
fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 300;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Sends role-tagged turns to the provider and extracts the reply.
///
/// One blocking call per invocation: no retry, no streaming.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Relay `turns` and return the provider's reply.
    async fn complete(
        &self,
        turns: &[ChatTurn],
        options: ChatOptions,
    ) -> Result<ChatReply, ChatModelError>;
}
