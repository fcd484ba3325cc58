//! Routes for the player registry context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use tictactoe_core::error::DomainError;
use tictactoe_players::application::query_handlers::PlayerView;
use tictactoe_players::application::{command_handlers, query_handlers};
use tictactoe_players::domain::commands;

use crate::error::ApiError;
use crate::routes::page_bounds;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    /// Display name to register.
    pub name: String,
}

/// Query parameters for GET /.
#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    /// Exact name to look up instead of listing everyone.
    pub name: Option<String>,
    /// Number of players to skip.
    pub skip: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

/// POST /
#[instrument(skip(state, request))]
async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<PlayerView>), ApiError> {
    let command = commands::RegisterPlayer {
        correlation_id: Uuid::new_v4(),
        name: request.name,
    };

    info!(correlation_id = %command.correlation_id, "handling register_player command");

    let player = command_handlers::handle_register_player(
        &command,
        state.clock.as_ref(),
        &*state.player_registry,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// GET /{player_id}
#[instrument(skip(state))]
async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<PlayerView>, ApiError> {
    let player = query_handlers::get_player_by_id(player_id, &*state.player_registry).await?;
    Ok(Json(player))
}

/// GET /
#[instrument(skip(state))]
async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<Vec<PlayerView>>, ApiError> {
    if let Some(name) = params.name {
        return match query_handlers::get_player_by_name(&name, &*state.player_registry).await {
            Ok(player) => Ok(Json(vec![player])),
            Err(DomainError::PlayerNotFound(_)) => Ok(Json(Vec::new())),
            Err(e) => Err(e.into()),
        };
    }

    let (skip, limit) = page_bounds(params.skip, params.limit);
    let players = query_handlers::list_players(skip, limit, &*state.player_registry).await?;
    Ok(Json(players))
}

/// Returns the router for the player registry context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(register_player))
        .route("/{player_id}", get(get_player))
}
