//! Domain ports: the traits adapters implement and services consume.
//!
//! Use-case ports ([`AccountService`], [`IdeaStore`], [`MessageThread`],
//! [`TaskGenerator`]) are what HTTP handlers depend on. Repository ports and
//! the [`ChatModel`] relay port are what the domain services depend on; the
//! outbound layer provides Diesel- and reqwest-backed implementations.

pub mod account_service;
pub mod chat_model;
pub mod idea_repository;
pub mod idea_store;
pub mod message_repository;
pub mod message_thread;
pub mod task_generator;
pub mod task_repository;
pub mod user_repository;

pub use account_service::{AccountService, LoginOutcome, Signup};
pub use chat_model::{ChatModel, ChatModelError};
pub use idea_repository::{IdeaPersistenceError, IdeaRepository};
pub use idea_store::IdeaStore;
pub use message_repository::{MessagePersistenceError, MessageRepository, NewMessage};
pub use message_thread::MessageThread;
pub use task_generator::{DEFAULT_NUM_TASKS, GeneratedTasks, TaskGenerator};
pub use task_repository::{TaskPersistenceError, TaskRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
