//! Use-case port for task listing and generation.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::task::Task;

/// Batch size requested when the client does not specify one.
pub const DEFAULT_NUM_TASKS: u32 = 5;

/// Result of one generation run: the persisted batch plus the provider's raw
/// payload for diagnostics. The raw payload is not part of the task data
/// model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTasks {
    pub tasks: Vec<Task>,
    pub raw_model: Value,
}

/// Task operations exposed to the HTTP layer.
#[async_trait]
pub trait TaskGenerator: Send + Sync {
    /// All tasks for an idea, ascending by creation time.
    async fn list_tasks(&self, idea_id: Uuid) -> Result<Vec<Task>, Error>;

    /// Ask the chat model for `num_tasks` tasks derived from the idea,
    /// persist them, and return them in the order the model emitted them.
    /// Generated tasks append to the existing list; nothing is replaced.
    async fn generate_tasks(
        &self,
        idea_id: Uuid,
        num_tasks: u32,
    ) -> Result<GeneratedTasks, Error>;
}
