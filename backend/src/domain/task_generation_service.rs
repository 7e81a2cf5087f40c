//! Task generation orchestration: idea → prompt → relay → parse → persist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::chat::{ChatOptions, ChatTurn};
use crate::domain::ports::{
    ChatModel, GeneratedTasks, IdeaPersistenceError, IdeaRepository, TaskGenerator,
    TaskPersistenceError, TaskRepository,
};
use crate::domain::task::Task;
use crate::domain::task_generation::{
    TASK_MAX_TOKENS, TASK_SYSTEM_PROMPT, TASK_TEMPERATURE, build_task_prompt, drafts_from_value,
    extract_first_json,
};

/// [`TaskGenerator`] implementation over the idea/task repositories and the
/// chat-completion relay.
#[derive(Clone)]
pub struct TaskGenerationService {
    ideas: Arc<dyn IdeaRepository>,
    tasks: Arc<dyn TaskRepository>,
    chat_model: Arc<dyn ChatModel>,
}

impl TaskGenerationService {
    /// Create a service over the given repositories and relay.
    pub fn new(
        ideas: Arc<dyn IdeaRepository>,
        tasks: Arc<dyn TaskRepository>,
        chat_model: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            ideas,
            tasks,
            chat_model,
        }
    }
}

fn map_idea_error(error: IdeaPersistenceError) -> Error {
    match error {
        IdeaPersistenceError::Connection { message } | IdeaPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}

fn map_task_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } | TaskPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}

#[async_trait]
impl TaskGenerator for TaskGenerationService {
    async fn list_tasks(&self, idea_id: Uuid) -> Result<Vec<Task>, Error> {
        self.tasks
            .list_for_idea(idea_id)
            .await
            .map_err(map_task_error)
    }

    async fn generate_tasks(
        &self,
        idea_id: Uuid,
        num_tasks: u32,
    ) -> Result<GeneratedTasks, Error> {
        let idea = self
            .ideas
            .find_by_id(idea_id)
            .await
            .map_err(map_idea_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))?;

        let turns = [
            ChatTurn::system(TASK_SYSTEM_PROMPT),
            ChatTurn::user(build_task_prompt(&idea, num_tasks)),
        ];
        let reply = self
            .chat_model
            .complete(&turns, ChatOptions::new(TASK_MAX_TOKENS, TASK_TEMPERATURE))
            .await?;

        let text = reply.assistant_text();
        let value = extract_first_json(&text)?;
        let drafts = drafts_from_value(&value)?;
        debug!(idea_id = %idea_id, requested = num_tasks, parsed = drafts.len(), "model batch parsed");

        // One atomic statement: either the whole batch lands or none of it.
        let tasks = self
            .tasks
            .insert_batch(idea_id, drafts)
            .await
            .map_err(map_task_error)?;
        Ok(GeneratedTasks {
            tasks,
            raw_model: reply.raw,
        })
    }
}
