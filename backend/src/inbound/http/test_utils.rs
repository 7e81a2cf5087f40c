//! Stub port implementations shared by handler tests.
//!
//! Each handler test starts from [`unwired_state`] and swaps in a real stub
//! for the one port under test, so an accidental call into an unrelated
//! port fails loudly.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::idea::{Idea, IdeaDraft};
use crate::domain::message::{Message, MessageRole};
use crate::domain::ports::{
    AccountService, GeneratedTasks, IdeaStore, LoginOutcome, MessageThread, Signup, TaskGenerator,
};
use crate::domain::task::Task;
use crate::inbound::http::state::HttpState;

pub(crate) struct UnwiredAccounts;

#[async_trait]
impl AccountService for UnwiredAccounts {
    async fn sign_up(&self, _signup: Signup) -> Result<(), Error> {
        Err(Error::internal("account port not wired in this test"))
    }

    async fn log_in(&self, _email: &str, _password: &str) -> Result<LoginOutcome, Error> {
        Err(Error::internal("account port not wired in this test"))
    }
}

pub(crate) struct UnwiredIdeas;

#[async_trait]
impl IdeaStore for UnwiredIdeas {
    async fn list_ideas(&self) -> Result<Vec<Idea>, Error> {
        Err(Error::internal("idea port not wired in this test"))
    }

    async fn create_idea(&self, _draft: IdeaDraft) -> Result<Idea, Error> {
        Err(Error::internal("idea port not wired in this test"))
    }

    async fn get_idea(&self, _id: Uuid) -> Result<Idea, Error> {
        Err(Error::internal("idea port not wired in this test"))
    }

    async fn delete_idea(&self, _id: Uuid) -> Result<(), Error> {
        Err(Error::internal("idea port not wired in this test"))
    }
}

pub(crate) struct UnwiredThread;

#[async_trait]
impl MessageThread for UnwiredThread {
    async fn list_messages(&self, _idea_id: Uuid) -> Result<Vec<Message>, Error> {
        Err(Error::internal("thread port not wired in this test"))
    }

    async fn post_message(
        &self,
        _idea_id: Uuid,
        _role: MessageRole,
        _content: String,
    ) -> Result<Message, Error> {
        Err(Error::internal("thread port not wired in this test"))
    }
}

pub(crate) struct UnwiredTasks;

#[async_trait]
impl TaskGenerator for UnwiredTasks {
    async fn list_tasks(&self, _idea_id: Uuid) -> Result<Vec<Task>, Error> {
        Err(Error::internal("task port not wired in this test"))
    }

    async fn generate_tasks(
        &self,
        _idea_id: Uuid,
        _num_tasks: u32,
    ) -> Result<GeneratedTasks, Error> {
        Err(Error::internal("task port not wired in this test"))
    }
}

/// State where every port fails; tests replace the port they exercise.
pub(crate) fn unwired_state() -> HttpState {
    HttpState::new(
        Arc::new(UnwiredAccounts),
        Arc::new(UnwiredIdeas),
        Arc::new(UnwiredThread),
        Arc::new(UnwiredTasks),
    )
}
