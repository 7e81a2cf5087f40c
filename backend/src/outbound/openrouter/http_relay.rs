//! Reqwest adapter implementing the `ChatModel` port.
//!
//! This adapter owns transport details only: bearer authentication, request
//! serialisation, HTTP error mapping, and decoding the reply envelope. It
//! performs exactly one call per invocation with no retry and no streaming.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use super::dto::{ChatCompletionRequestDto, assistant_text};
use crate::domain::chat::{ChatOptions, ChatReply, ChatTurn};
use crate::domain::ports::{ChatModel, ChatModelError};

/// Endpoint used when no override is configured.
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model identifier used when neither configuration nor the caller names one.
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-20b:free";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completion relay speaking the OpenAI-compatible wire format.
pub struct OpenRouterChatModel {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    default_model: String,
}

impl OpenRouterChatModel {
    /// Build an adapter with the standard request timeout.
    ///
    /// A missing `api_key` is allowed here; calls will fail with
    /// [`ChatModelError::Configuration`] before any network I/O.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        default_model: String,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, default_model, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        api_key: Option<String>,
        default_model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            default_model,
        })
    }
}

/// Decode a provider body into a reply. An undecodable body becomes the
/// reply verbatim so callers always have some text to work with.
fn decode_reply(body: &str) -> ChatReply {
    match serde_json::from_str::<Value>(body) {
        Ok(raw) => {
            let assistant = assistant_text(&raw);
            ChatReply { raw, assistant }
        }
        Err(_) => ChatReply {
            raw: Value::String(body.to_owned()),
            assistant: Some(body.to_owned()),
        },
    }
}

#[async_trait]
impl ChatModel for OpenRouterChatModel {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        options: ChatOptions,
    ) -> Result<ChatReply, ChatModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ChatModelError::Configuration)?;
        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let payload = ChatCompletionRequestDto {
            model,
            messages: turns,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ChatModelError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ChatModelError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(ChatModelError::upstream(status.as_u16(), body));
        }

        Ok(decode_reply(&body))
    }
}
