//! ideaforge backend: ideas, model-relayed chat threads, and generated
//! task lists over PostgreSQL and an OpenAI-compatible chat-completion API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
