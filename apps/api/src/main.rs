use axum_helpers::{JwtAuth, create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{AppState, InMemoryUserRepository, UserService, handlers};
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let jwt_auth = JwtAuth::new(&config.jwt);
    let state = AppState {
        service: UserService::new(InMemoryUserRepository::new()),
        jwt_auth,
    };

    let app = handlers::router(state)
        .merge(health_router(config.app.clone()))
        .layer(TraceLayer::new_for_http());

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Accounts API shutdown complete");
    Ok(())
}
