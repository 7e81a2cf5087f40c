//! Server assembly: infrastructure adapters wired into the Actix app.

pub mod config;

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::auth::AuthTokens;
use crate::domain::ports::ChatModel;
use crate::domain::{
    ConversationService, CredentialService, Error, IdeaCatalogue, TaskGenerationService,
};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, health, ideas, messages, tasks};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DbPool, DieselIdeaRepository, DieselMessageRepository, DieselTaskRepository,
    DieselUserRepository,
};

/// Wire the Diesel repositories and the relay into the use-case services.
pub fn build_state(pool: DbPool, relay: Arc<dyn ChatModel>, tokens: Arc<AuthTokens>) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let idea_repo = Arc::new(DieselIdeaRepository::new(pool.clone()));
    let message_repo = Arc::new(DieselMessageRepository::new(pool.clone()));
    let task_repo = Arc::new(DieselTaskRepository::new(pool));

    HttpState::new(
        Arc::new(CredentialService::new(users, tokens)),
        Arc::new(IdeaCatalogue::new(
            idea_repo.clone(),
            message_repo.clone(),
            task_repo.clone(),
        )),
        Arc::new(ConversationService::new(message_repo, relay.clone())),
        Arc::new(TaskGenerationService::new(idea_repo, task_repo, relay)),
    )
}

/// Body deserialisation failures go through the shared error envelope too.
fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Assemble the Actix application around prepared state.
pub fn build_app(
    state: HttpState,
    tokens: web::Data<AuthTokens>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(tokens)
        .app_data(health_state)
        .app_data(json_error_config())
        .service(auth::signup)
        .service(auth::login)
        .service(ideas::list_ideas)
        .service(ideas::create_idea)
        .service(ideas::delete_idea)
        .service(ideas::get_idea)
        .service(messages::list_messages)
        .service(messages::post_message)
        .service(tasks::list_tasks)
        .service(tasks::generate_tasks)
        .service(health::ready)
        .service(health::live);

    let app = app.wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}
