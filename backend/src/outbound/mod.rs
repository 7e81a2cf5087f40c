//! Outbound adapters: PostgreSQL persistence and the chat-completion relay.

pub mod openrouter;
pub mod persistence;
