//! PostgreSQL persistence adapters built on Diesel and diesel-async.

pub mod diesel_idea_repository;
pub mod diesel_message_repository;
pub mod diesel_task_repository;
pub mod diesel_user_repository;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_idea_repository::DieselIdeaRepository;
pub use diesel_message_repository::DieselMessageRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
