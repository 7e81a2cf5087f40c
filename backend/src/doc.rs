//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schemas their bodies
//! reference. The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Session token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "ideaforge API",
        description = "Capture project ideas, chat about them with a language model, and generate prioritized task lists."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::ideas::list_ideas,
        crate::inbound::http::ideas::create_idea,
        crate::inbound::http::ideas::delete_idea,
        crate::inbound::http::ideas::get_idea,
        crate::inbound::http::messages::list_messages,
        crate::inbound::http::messages::post_message,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::generate_tasks,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Idea,
        crate::domain::Message,
        crate::domain::MessageRole,
        crate::domain::Task,
        crate::domain::UserProfile,
        crate::inbound::http::AckResponse,
        crate::inbound::http::auth::SignupRequest,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::auth::LoginResponse,
        crate::inbound::http::ideas::CreateIdeaRequest,
        crate::inbound::http::ideas::IdeaCreatedResponse,
        crate::inbound::http::ideas::DeleteIdeaRequest,
        crate::inbound::http::messages::MessagesResponse,
        crate::inbound::http::messages::PostMessageRequest,
        crate::inbound::http::messages::PostMessageResponse,
        crate::inbound::http::tasks::TasksResponse,
        crate::inbound::http::tasks::GenerateTasksRequest,
        crate::inbound::http::tasks::GenerateTasksResponse,
    )),
    tags(
        (name = "auth", description = "Account signup and login"),
        (name = "ideas", description = "Idea records and cascade deletion"),
        (name = "messages", description = "Per-idea chat threads"),
        (name = "tasks", description = "Task listing and generation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/signup",
            "/auth/login",
            "/ideas",
            "/ideas/{id}",
            "/ideas/{id}/messages",
            "/ideas/{id}/generate-tasks",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }

    #[test]
    fn document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.keys().any(|key| key.ends_with("Error")));
    }
}
