//! Tic-tac-toe match service API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tictactoe_api::config::ServerConfig;
use tictactoe_api::error::AppError;
use tictactoe_api::state::AppState;
use tictactoe_api::{build_router, telemetry};
use tictactoe_core::clock::SystemClock;
use tictactoe_store::pg_game_repository::PgGameRepository;
use tictactoe_store::pg_player_registry::PgPlayerRegistry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting tic-tac-toe API server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("../../migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgGameRepository::new(pool.clone())),
        Arc::new(PgPlayerRegistry::new(pool)),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
