//! Idea CRUD and the explicit delete cascade.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::idea::{Idea, IdeaDraft};
use crate::domain::ports::{
    IdeaPersistenceError, IdeaRepository, IdeaStore, MessagePersistenceError, MessageRepository,
    TaskPersistenceError, TaskRepository,
};

/// [`IdeaStore`] implementation orchestrating the idea repository and the
/// dependent message/task repositories for cascade deletion.
#[derive(Clone)]
pub struct IdeaCatalogue {
    ideas: Arc<dyn IdeaRepository>,
    messages: Arc<dyn MessageRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl IdeaCatalogue {
    /// Create a catalogue over the given repositories.
    pub fn new(
        ideas: Arc<dyn IdeaRepository>,
        messages: Arc<dyn MessageRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            ideas,
            messages,
            tasks,
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

fn map_message_error(error: MessagePersistenceError) -> Error {
    match error {
        MessagePersistenceError::Connection { message }
        | MessagePersistenceError::Query { message } => Error::internal(message),
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
impl IdeaStore for IdeaCatalogue {
    async fn list_ideas(&self) -> Result<Vec<Idea>, Error> {
        self.ideas.list().await.map_err(map_idea_error)
    }

    async fn create_idea(&self, draft: IdeaDraft) -> Result<Idea, Error> {
        self.ideas.insert(draft).await.map_err(map_idea_error)
    }

    async fn get_idea(&self, id: Uuid) -> Result<Idea, Error> {
        self.ideas
            .find_by_id(id)
            .await
            .map_err(map_idea_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))
    }

    async fn delete_idea(&self, id: Uuid) -> Result<(), Error> {
        // Dependents first, so a failure part-way never leaves orphaned rows
        // pointing at a missing idea.
        let messages_removed = self
            .messages
            .delete_for_idea(id)
            .await
            .map_err(map_message_error)?;
        let tasks_removed = self
            .tasks
            .delete_for_idea(id)
            .await
            .map_err(map_task_error)?;
        let ideas_removed = self.ideas.delete(id).await.map_err(map_idea_error)?;
        debug!(
            idea_id = %id,
            messages_removed,
            tasks_removed,
            ideas_removed,
            "idea deleted with cascade"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::message::Message;
    use crate::domain::ports::NewMessage;
    use crate::domain::task::{Task, TaskDraft};
    use chrono::Utc;

    #[derive(Default)]
    struct StubIdeaRepository {
        ideas: Mutex<Vec<Idea>>,
        deletions: Mutex<Vec<Uuid>>,
    }

    impl StubIdeaRepository {
        fn with_idea(idea: Idea) -> Self {
            Self {
                ideas: Mutex::new(vec![idea]),
                deletions: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl IdeaRepository for StubIdeaRepository {
        async fn insert(&self, draft: IdeaDraft) -> Result<Idea, IdeaPersistenceError> {
            let now = Utc::now();
            let idea = Idea {
                id: Uuid::new_v4(),
                title: draft.title().to_owned(),
                description: draft.description().to_owned(),
                tags: draft.tags().to_vec(),
                created_at: now,
                updated_at: now,
            };
            self.ideas.lock().expect("lock").push(idea.clone());
            Ok(idea)
        }

        async fn list(&self) -> Result<Vec<Idea>, IdeaPersistenceError> {
            let mut ideas = self.ideas.lock().expect("lock").clone();
            ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(ideas)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError> {
            Ok(self
                .ideas
                .lock()
                .expect("lock")
                .iter()
                .find(|idea| idea.id == id)
                .cloned())
        }

        async fn delete(&self, id: Uuid) -> Result<u64, IdeaPersistenceError> {
            self.deletions.lock().expect("lock").push(id);
            let mut ideas = self.ideas.lock().expect("lock");
            let before = ideas.len();
            ideas.retain(|idea| idea.id != id);
            Ok((before - ideas.len()) as u64)
        }
    }

    #[derive(Default)]
    struct StubMessageRepository {
        deletions: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl MessageRepository for StubMessageRepository {
        async fn insert(&self, _message: NewMessage) -> Result<Message, MessagePersistenceError> {
            Err(MessagePersistenceError::query("not used in these tests"))
        }

        async fn list_for_idea(
            &self,
            _idea_id: Uuid,
        ) -> Result<Vec<Message>, MessagePersistenceError> {
            Ok(vec![])
        }

        async fn recent_for_idea(
            &self,
            _idea_id: Uuid,
            _limit: i64,
        ) -> Result<Vec<Message>, MessagePersistenceError> {
            Ok(vec![])
        }

        async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, MessagePersistenceError> {
            self.deletions.lock().expect("lock").push(idea_id);
            Ok(2)
        }
    }

    #[derive(Default)]
    struct StubTaskRepository {
        deletions: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl TaskRepository for StubTaskRepository {
        async fn insert_batch(
            &self,
            _idea_id: Uuid,
            _drafts: Vec<TaskDraft>,
        ) -> Result<Vec<Task>, TaskPersistenceError> {
            Err(TaskPersistenceError::query("not used in these tests"))
        }

        async fn list_for_idea(&self, _idea_id: Uuid) -> Result<Vec<Task>, TaskPersistenceError> {
            Ok(vec![])
        }

        async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, TaskPersistenceError> {
            self.deletions.lock().expect("lock").push(idea_id);
            Ok(3)
        }
    }

    fn idea() -> Idea {
        let now = Utc::now();
        Idea {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            tags: vec!["x".into(), "y".into()],
            created_at: now,
            updated_at: now,
        }
    }

    fn catalogue(
        ideas: Arc<StubIdeaRepository>,
        messages: Arc<StubMessageRepository>,
        tasks: Arc<StubTaskRepository>,
    ) -> IdeaCatalogue {
        IdeaCatalogue::new(ideas, messages, tasks)
    }

    #[tokio::test]
    async fn get_idea_reports_not_found_for_unknown_id() {
        let catalogue = catalogue(
            Arc::new(StubIdeaRepository::default()),
            Arc::new(StubMessageRepository::default()),
            Arc::new(StubTaskRepository::default()),
        );
        let err = catalogue
            .get_idea(Uuid::new_v4())
            .await
            .expect_err("unknown idea");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn create_round_trips_tags_in_order() {
        let catalogue = catalogue(
            Arc::new(StubIdeaRepository::default()),
            Arc::new(StubMessageRepository::default()),
            Arc::new(StubTaskRepository::default()),
        );
        let draft = IdeaDraft::new("t", "d", vec!["x".into(), "y".into()]).expect("draft");
        let created = catalogue.create_idea(draft).await.expect("create");
        let fetched = catalogue.get_idea(created.id).await.expect("get");
        assert_eq!(fetched.tags, ["x", "y"]);
    }

    #[tokio::test]
    async fn delete_cascades_messages_and_tasks_before_the_idea() {
        let target = idea();
        let ideas = Arc::new(StubIdeaRepository::with_idea(target.clone()));
        let messages = Arc::new(StubMessageRepository::default());
        let tasks = Arc::new(StubTaskRepository::default());
        let catalogue = catalogue(ideas.clone(), messages.clone(), tasks.clone());

        catalogue.delete_idea(target.id).await.expect("delete");

        assert_eq!(*messages.deletions.lock().expect("lock"), vec![target.id]);
        assert_eq!(*tasks.deletions.lock().expect("lock"), vec![target.id]);
        assert_eq!(*ideas.deletions.lock().expect("lock"), vec![target.id]);
        let err = catalogue
            .get_idea(target.id)
            .await
            .expect_err("idea removed");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn deleting_an_unknown_idea_still_succeeds() {
        let catalogue = catalogue(
            Arc::new(StubIdeaRepository::default()),
            Arc::new(StubMessageRepository::default()),
            Arc::new(StubTaskRepository::default()),
        );
        catalogue
            .delete_idea(Uuid::new_v4())
            .await
            .expect("no-op delete succeeds");
    }
}
