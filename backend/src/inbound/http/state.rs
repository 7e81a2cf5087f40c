//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, IdeaStore, MessageThread, TaskGenerator};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login.
    pub accounts: Arc<dyn AccountService>,
    /// Idea CRUD and cascade deletion.
    pub ideas: Arc<dyn IdeaStore>,
    /// Per-idea chat thread.
    pub thread: Arc<dyn MessageThread>,
    /// Task listing and generation.
    pub tasks: Arc<dyn TaskGenerator>,
}

impl HttpState {
    /// Construct state from the four use-case ports.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        ideas: Arc<dyn IdeaStore>,
        thread: Arc<dyn MessageThread>,
        tasks: Arc<dyn TaskGenerator>,
    ) -> Self {
        Self {
            accounts,
            ideas,
            thread,
            tasks,
        }
    }
}
