//! Diesel row types used by the persistence adapters.
//!
//! Read rows decode straight from queries; new rows carry app-generated ids
//! and timestamps so adapters can return the stored record without a
//! re-select.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use super::schema::{ideas, messages, tasks, users};
use crate::domain::idea::Idea;
use crate::domain::message::{Message, MessageRole};
use crate::domain::task::Task;
use crate::domain::user::{Email, UserAccount};

/// Queryable row for accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// Insertable row for accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Queryable row for ideas.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IdeaRow> for Idea {
    fn from(row: IdeaRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable row for ideas.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Queryable row for messages.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        let role = MessageRole::parse(&row.role).unwrap_or_else(|| {
            warn!(
                value = row.role,
                message_id = %row.id,
                "unrecognised message role, treating as system"
            );
            MessageRole::System
        });
        Self {
            id: row.id,
            idea_id: row.idea_id,
            role,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Insertable row for messages.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Queryable row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            idea_id: row.idea_id,
            title: row.title,
            description: row.description,
            priority: row.priority,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Insertable row for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_row_with_invalid_email_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "corrupted".into(),
            password_hash: "$2b$10$abc".into(),
            created_at: Utc::now(),
        };
        let err = UserAccount::try_from(row).expect_err("invalid stored email");
        assert!(err.contains("invalid"));
    }

    #[test]
    fn message_row_with_unknown_role_becomes_system() {
        let row = MessageRow {
            id: Uuid::new_v4(),
            idea_id: Uuid::new_v4(),
            role: "moderator".into(),
            content: "hi".into(),
            created_at: Utc::now(),
        };
        let message = Message::from(row);
        assert_eq!(message.role, MessageRole::System);
    }

    #[test]
    fn idea_row_round_trips_tags() {
        let row = IdeaRow {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            tags: vec!["x".into(), "y".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let idea = Idea::from(row);
        assert_eq!(idea.tags, ["x", "y"]);
    }
}
