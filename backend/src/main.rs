//! Backend entry-point: environment config, adapter wiring, HTTP server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ideaforge::domain::auth::AuthTokens;
use ideaforge::inbound::http::health::HealthState;
use ideaforge::outbound::openrouter::OpenRouterChatModel;
use ideaforge::outbound::persistence::{DbPool, PoolConfig};
use ideaforge::server::config::AppConfig;
use ideaforge::server::{build_app, build_state};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url.clone()))
        .await
        .map_err(std::io::Error::other)?;
    let relay = OpenRouterChatModel::new(
        config.chat_endpoint.clone(),
        config.chat_api_key.clone(),
        config.chat_model.clone(),
    )
    .map_err(std::io::Error::other)?;
    let tokens = Arc::new(AuthTokens::new(&config.token_secret));

    let state = build_state(pool, Arc::new(relay), tokens.clone());
    let token_data = web::Data::from(tokens);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            token_data.clone(),
            server_health_state.clone(),
        )
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "listening");
    server.run().await
}
