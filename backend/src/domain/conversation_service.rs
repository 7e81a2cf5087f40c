//! Message thread orchestration: persist, window, relay, persist the reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::chat::{ChatOptions, ChatRole, ChatTurn};
use crate::domain::message::{Message, MessageRole};
use crate::domain::ports::{
    ChatModel, MessagePersistenceError, MessageRepository, MessageThread, NewMessage,
};

/// How many of the most recent messages are sent to the model for context.
pub const CONTEXT_WINDOW_MESSAGES: i64 = 30;

/// [`MessageThread`] implementation over the message repository and the
/// chat-completion relay.
#[derive(Clone)]
pub struct ConversationService {
    messages: Arc<dyn MessageRepository>,
    chat_model: Arc<dyn ChatModel>,
}

impl ConversationService {
    /// Create a service over the given repository and relay.
    pub fn new(messages: Arc<dyn MessageRepository>, chat_model: Arc<dyn ChatModel>) -> Self {
        Self {
            messages,
            chat_model,
        }
    }
}

fn map_persistence_error(error: MessagePersistenceError) -> Error {
    match error {
        MessagePersistenceError::Connection { message }
        | MessagePersistenceError::Query { message } => Error::internal(message),
    }
}

/// Present a stored message as a relay turn. Roles other than `user` and
/// `assistant` reach the provider as `system`.
fn chat_turn(message: &Message) -> ChatTurn {
    let role = match message.role {
        MessageRole::User => ChatRole::User,
        MessageRole::Assistant => ChatRole::Assistant,
        MessageRole::System => ChatRole::System,
    };
    ChatTurn {
        role,
        content: message.content.clone(),
    }
}

#[async_trait]
impl MessageThread for ConversationService {
    async fn list_messages(&self, idea_id: Uuid) -> Result<Vec<Message>, Error> {
        self.messages
            .list_for_idea(idea_id)
            .await
            .map_err(map_persistence_error)
    }

    async fn post_message(
        &self,
        idea_id: Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<Message, Error> {
        // Durability before the model call: whatever the relay does, the
        // submitted turn is already stored.
        let submitted = self
            .messages
            .insert(NewMessage {
                idea_id,
                role,
                content,
            })
            .await
            .map_err(map_persistence_error)?;

        let recent = self
            .messages
            .recent_for_idea(idea_id, CONTEXT_WINDOW_MESSAGES)
            .await
            .map_err(map_persistence_error)?;
        let mut turns: Vec<ChatTurn> = recent.iter().map(chat_turn).collect();
        // The window read above may already contain the turn stored a moment
        // ago, and concurrent posts to the same idea can interleave with it.
        // The possible duplicate is accepted rather than serialised per idea.
        turns.push(chat_turn(&submitted));

        let reply = self
            .chat_model
            .complete(&turns, ChatOptions::default())
            .await?;
        debug!(idea_id = %idea_id, turns = turns.len(), "chat model replied");

        let assistant = self
            .messages
            .insert(NewMessage {
                idea_id,
                role: MessageRole::Assistant,
                content: reply.assistant_text(),
            })
            .await
            .map_err(map_persistence_error)?;
        Ok(assistant)
    }
}
