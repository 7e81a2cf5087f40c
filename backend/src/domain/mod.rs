//! Domain entities, services, and ports.
//!
//! Types here are transport agnostic: inbound adapters map them to HTTP and
//! outbound adapters persist them or relay them to the chat provider. Each
//! type documents its invariants and serde contract in its own Rustdoc.

pub mod account_service;
pub mod auth;
pub mod chat;
pub mod conversation_service;
pub mod error;
pub mod idea;
pub mod idea_service;
pub mod message;
pub mod ports;
pub mod task;
pub mod task_generation;
pub mod task_generation_service;
pub mod user;

pub use self::account_service::CredentialService;
pub use self::conversation_service::ConversationService;
pub use self::error::{Error, ErrorCode};
pub use self::idea::{Idea, IdeaDraft};
pub use self::idea_service::IdeaCatalogue;
pub use self::message::{Message, MessageRole};
pub use self::task::Task;
pub use self::task_generation_service::TaskGenerationService;
pub use self::user::UserProfile;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use ideaforge::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
