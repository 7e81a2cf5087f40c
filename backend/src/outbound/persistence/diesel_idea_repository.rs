//! PostgreSQL-backed `IdeaRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::idea::{Idea, IdeaDraft};
use crate::domain::ports::{IdeaPersistenceError, IdeaRepository};

use super::models::{IdeaRow, NewIdeaRow};
use super::pool::{DbPool, PoolError};
use super::schema::ideas;

/// Diesel-backed implementation of the `IdeaRepository` port.
#[derive(Clone)]
pub struct DieselIdeaRepository {
    pool: DbPool,
}

impl DieselIdeaRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IdeaPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IdeaPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> IdeaPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IdeaPersistenceError::connection("database connection error")
        }
        _ => IdeaPersistenceError::query("database error"),
    }
}

#[async_trait]
impl IdeaRepository for DieselIdeaRepository {
    async fn insert(&self, draft: IdeaDraft) -> Result<Idea, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let row = NewIdeaRow {
            id: Uuid::new_v4(),
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            tags: draft.tags().to_vec(),
            created_at: now,
            updated_at: now,
        };
        let stored: IdeaRow = diesel::insert_into(ideas::table)
            .values(&row)
            .returning(IdeaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn list(&self) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IdeaRow> = ideas::table
            .order(ideas::created_at.desc())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Idea::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IdeaRow> = ideas::table
            .filter(ideas::id.eq(id))
            .select(IdeaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Idea::from))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(ideas::table.filter(ideas::id.eq(id)))
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
    fn pool_errors_map_to_connection_failures() {
        let error = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(error, IdeaPersistenceError::Connection { .. }));
    }

    #[test]
    fn closed_connections_map_to_connection_failures() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            IdeaPersistenceError::Connection { .. }
        ));
    }

    #[test]
    fn other_errors_map_to_query_failures() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            IdeaPersistenceError::Query { .. }
        ));
    }
}
