//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name chosen at signup.
        name -> Varchar,
        /// Unique login email address.
        email -> Varchar,
        /// Bcrypt hash of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project ideas; each anchors a message thread and a task list.
    ideas (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Idea headline.
        title -> Varchar,
        /// Free-text description used as model context.
        description -> Text,
        /// Ordered labels attached at creation time.
        tags -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only chat turns owned by one idea.
    messages (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning idea.
        idea_id -> Uuid,
        /// Author role: user, assistant, or system.
        role -> Varchar,
        /// Turn body.
        content -> Text,
        /// Record creation timestamp; orders the thread.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Generated tasks owned by one idea.
    tasks (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning idea.
        idea_id -> Uuid,
        /// Short action description.
        title -> Varchar,
        /// Longer free-text detail.
        description -> Text,
        /// Urgency, always within [1, 3].
        priority -> Int4,
        /// Free-text workflow state.
        status -> Varchar,
        /// Record creation timestamp; orders the batch.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(messages -> ideas (idea_id));
diesel::joinable!(tasks -> ideas (idea_id));

diesel::allow_tables_to_appear_in_same_query!(users, ideas, messages, tasks);
