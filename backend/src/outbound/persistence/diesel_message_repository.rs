//! PostgreSQL-backed `MessageRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::message::Message;
use crate::domain::ports::{MessagePersistenceError, MessageRepository, NewMessage};

use super::models::{MessageRow, NewMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::messages;

/// Diesel-backed implementation of the `MessageRepository` port.
#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MessagePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MessagePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> MessagePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MessagePersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            MessagePersistenceError::query("referenced idea does not exist")
        }
        _ => MessagePersistenceError::query("database error"),
    }
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn insert(&self, message: NewMessage) -> Result<Message, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewMessageRow {
            id: Uuid::new_v4(),
            idea_id: message.idea_id,
            role: message.role.as_str().to_owned(),
            content: message.content,
            created_at: Utc::now(),
        };
        let stored: MessageRow = diesel::insert_into(messages::table)
            .values(&row)
            .returning(MessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn list_for_idea(&self, idea_id: Uuid) -> Result<Vec<Message>, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MessageRow> = messages::table
            .filter(messages::idea_id.eq(idea_id))
            .order(messages::created_at.asc())
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn recent_for_idea(
        &self,
        idea_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Newest-first to apply the limit, then flipped back so callers see
        // the window in thread order.
        let mut rows: Vec<MessageRow> = messages::table
            .filter(messages::idea_id.eq(idea_id))
            .order(messages::created_at.desc())
            .limit(limit)
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.reverse();

        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn delete_for_idea(&self, idea_id: Uuid) -> Result<u64, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(messages::table.filter(messages::idea_id.eq(idea_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the error mapping helpers.

    use super::*;

    #[test]
    fn foreign_key_violations_map_to_query_failures() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key constraint".to_owned()),
        );
        let mapped = map_diesel_error(error);
        assert_eq!(
            mapped,
            MessagePersistenceError::query("referenced idea does not exist")
        );
    }

    #[test]
    fn pool_errors_map_to_connection_failures() {
        let error = map_pool_error(PoolError::checkout("pool exhausted"));
        assert!(matches!(error, MessagePersistenceError::Connection { .. }));
    }
}
