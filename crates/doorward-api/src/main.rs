//! Doorward API server entry point.

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use doorward_access::application::registry::AccessRegistry;
use doorward_api::config::ServerConfig;
use doorward_api::effects::TracingEffects;
use doorward_api::routes;
use doorward_api::state::AppState;
use doorward_core::clock::SystemClock;
use doorward_core::rng::StdRandom;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Doorward API server");

    let config = ServerConfig::from_env()?;
    tracing::info!(pin_policy = ?config.pin_policy, "loaded configuration");

    // The registry lives exactly as long as this server session.
    let registry = Arc::new(AccessRegistry::new(
        config.pin_policy.clone(),
        Box::new(StdRandom::from_os()),
    ));
    let app_state = AppState::new(registry, Arc::new(SystemClock), Arc::new(TracingEffects));

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/doors", routes::doors::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
