//! PostgreSQL-backed `TaskRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::task::{DEFAULT_TASK_STATUS, Task, TaskDraft};

use super::models::{NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TaskPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TaskPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskPersistenceError::query("referenced idea does not exist")
        }
        _ => TaskPersistenceError::query("database error"),
    }
}

/// Build insert rows for a batch, staggering timestamps by one microsecond
/// per element so a later list ordered by creation time reproduces the order
/// the model emitted.
fn batch_rows(idea_id: Uuid, drafts: Vec<TaskDraft>) -> Vec<NewTaskRow> {
    let base = Utc::now();
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| NewTaskRow {
            id: Uuid::new_v4(),
            idea_id,
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            priority: draft.priority(),
            status: DEFAULT_TASK_STATUS.to_owned(),
            created_at: base + Duration::microseconds(index as i64),
        })
        .collect()
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert_batch(
        &self,
        idea_id: Uuid,
        drafts: Vec<TaskDraft>,
    ) -> Result<Vec<Task>, TaskPersistenceError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // One multi-row insert: the whole batch lands or none of it does.
        let rows = batch_rows(idea_id, drafts);
        let stored: Vec<TaskRow> = diesel::insert_into(tasks::table)
            .values(&rows)
            .returning(TaskRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into_iter().map(Task::from).collect())
    }

    async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::idea_id.eq(idea_id))
            .order(tasks::created_at.asc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(tasks::table.filter(tasks::idea_id.eq(idea_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed as u64)
    }
}
