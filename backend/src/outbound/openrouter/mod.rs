//! Reqwest-backed chat-completion relay adapter.

pub mod dto;
pub mod http_relay;

pub use http_relay::{DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL, OpenRouterChatModel};
