//! Wire shapes for the OpenAI-compatible chat-completions endpoint.
//!
//! The request body is a fixed, typed payload. The response is decoded as
//! loose JSON first and probed for the assistant text, because providers
//! vary in which envelope fields they populate.

use serde::Serialize;
use serde_json::Value;

use crate::domain::chat::ChatTurn;

/// Request body for `POST …/chat/completions`.
#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatTurn],
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Extract the assistant's text from a decoded response envelope.
///
/// Probes the first completion choice's `message.content`, then its `text`,
/// then accepts a bare JSON string body; yields `None` when none apply.
pub(super) fn assistant_text(raw: &Value) -> Option<String> {
    if let Some(choice) = raw.get("choices").and_then(|choices| choices.get(0)) {
        if let Some(content) = choice
            .pointer("/message/content")
            .and_then(Value::as_str)
        {
            return Some(content.to_owned());
        }
        if let Some(text) = choice.get("text").and_then(Value::as_str) {
            return Some(text.to_owned());
        }
    }
    raw.as_str().map(str::to_owned)
}
