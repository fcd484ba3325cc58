//! Tic-Tac-Toe — HTTP API.
//!
//! Exposes the game rules engine and the player registry over JSON.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every route mounted.
///
/// Cross-cutting layers (tracing, CORS) are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .nest("/api/v1/players", routes::players::router())
        .with_state(state)
}
