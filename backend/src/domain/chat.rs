//! Value types for the chat-completion relay contract.
//!
//! These shapes mirror what OpenAI-compatible providers accept and return;
//! the transport itself lives in `outbound::openrouter`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token budget sent with ordinary chat turns.
pub const DEFAULT_MAX_TOKENS: u32 = 800;
/// Sampling temperature for ordinary chat turns.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Role tag on a relayed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged turn in the conversation sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author role of the turn.
    pub role: ChatRole,
    /// Turn text.
    pub content: String,
}

impl ChatTurn {
    /// Construct a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Construct a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Construct an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call relay options.
///
/// `model` falls back to the relay's configured default when `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    /// Provider model identifier override.
    pub model: Option<String>,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ChatOptions {
    /// Options with an explicit token budget and temperature.
    pub const fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            model: None,
            max_tokens,
            temperature,
        }
    }
}

/// Provider response: the decoded body plus the extracted assistant text.
///
/// When the provider's body is not valid JSON, `raw` holds the body text as
/// a JSON string and `assistant` carries the same text, so callers always
/// have something to work with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Decoded response envelope, or the raw body text when undecodable.
    pub raw: Value,
    /// First completion choice's message content, if any.
    pub assistant: Option<String>,
}

impl ChatReply {
    /// The assistant's text, falling back to the raw payload rendered as a
    /// string. Never empty-handed: some string is always returned.
    pub fn assistant_text(&self) -> String {
        if let Some(text) = &self.assistant {
            return text.clone();
        }
        match &self.raw {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn turns_serialise_lowercase_roles() {
        let turn = ChatTurn::assistant("hi");
        let value = serde_json::to_value(&turn).expect("serialise turn");
        assert_eq!(value, json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn default_options_match_chat_tuning() {
        let options = ChatOptions::default();
        assert_eq!(options.max_tokens, 800);
        assert_eq!(options.temperature, 0.7);
        assert!(options.model.is_none());
    }

    #[test]
    fn assistant_text_prefers_extracted_content() {
        let reply = ChatReply {
            raw: json!({ "choices": [] }),
            assistant: Some("hello".into()),
        };
        assert_eq!(reply.assistant_text(), "hello");
    }

    #[test]
    fn assistant_text_falls_back_to_raw_string() {
        let reply = ChatReply {
            raw: Value::String("plain body".into()),
            assistant: None,
        };
        assert_eq!(reply.assistant_text(), "plain body");
    }

    #[test]
    fn assistant_text_renders_structured_raw_as_json() {
        let reply = ChatReply {
            raw: json!({ "error": "overloaded" }),
            assistant: None,
        };
        assert_eq!(reply.assistant_text(), r#"{"error":"overloaded"}"#);
    }
}
