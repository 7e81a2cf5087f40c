//! Use-case port for idea CRUD, consumed by the HTTP layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::idea::{Idea, IdeaDraft};

/// Idea operations exposed to the HTTP layer.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// All ideas, newest first.
    async fn list_ideas(&self) -> Result<Vec<Idea>, Error>;

    /// Create an idea from a validated draft.
    async fn create_idea(&self, draft: IdeaDraft) -> Result<Idea, Error>;

    /// Fetch one idea; not-found when the id is unknown.
    async fn get_idea(&self, id: Uuid) -> Result<Idea, Error>;

    /// Delete an idea together with its messages and tasks. Deleting an
    /// unknown idea succeeds as a no-op.
    async fn delete_idea(&self, id: Uuid) -> Result<(), Error>;
}
