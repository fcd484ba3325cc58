//! Routes for the game context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use tictactoe_core::repository::GameFilter;
use tictactoe_game::application::query_handlers::{GameView, PlayView};
use tictactoe_game::application::{command_handlers, query_handlers};
use tictactoe_game::domain::commands;

use crate::error::ApiError;
use crate::routes::page_bounds;
use crate::state::AppState;

/// One seat in a POST / request.
#[derive(Debug, Deserialize)]
pub struct SeatBody {
    /// Display name of the player.
    pub name: String,
    /// Requested mark; seats default to `X` then `O`.
    pub mark: Option<String>,
}

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    /// Exactly two seats, in order.
    pub players: Vec<SeatBody>,
    /// Name of the player who moves first; defaults to the first seat.
    pub starting_player: Option<String>,
}

/// Request body for POST /{game_id}/moves.
#[derive(Debug, Deserialize)]
pub struct ApplyMoveRequest {
    /// Name of the player making the move.
    pub player_name: String,
    /// Row, 1 to 3.
    pub row: i32,
    /// Column, 1 to 3.
    pub column: i32,
}

/// Query parameters for GET /.
#[derive(Debug, Deserialize)]
pub struct ListGamesParams {
    /// Only finished (or only open) games when set.
    pub finished: Option<bool>,
    /// Number of games to skip.
    pub skip: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

/// POST /
#[instrument(skip(state, request), fields(players = request.players.len()))]
async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let command = commands::StartGame {
        correlation_id: Uuid::new_v4(),
        players: request
            .players
            .into_iter()
            .map(|seat| commands::SeatRequest {
                name: seat.name,
                mark: seat.mark,
            })
            .collect(),
        starting_player: request.starting_player,
    };

    info!(correlation_id = %command.correlation_id, "handling start_game command");

    let game = command_handlers::handle_start_game(
        &command,
        state.clock.as_ref(),
        &*state.game_repository,
        &*state.player_registry,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(GameView::from(&game))))
}

/// POST /{game_id}/moves
#[instrument(skip(state, request), fields(player = %request.player_name))]
async fn apply_move(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<ApplyMoveRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let command = commands::ApplyMove {
        correlation_id: Uuid::new_v4(),
        game_id,
        player_name: request.player_name,
        row: request.row,
        column: request.column,
    };

    info!(correlation_id = %command.correlation_id, "handling apply_move command");

    let game =
        command_handlers::handle_apply_move(&command, state.clock.as_ref(), &*state.game_repository)
            .await?;

    Ok((StatusCode::CREATED, Json(GameView::from(&game))))
}

/// GET /{game_id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameView>, ApiError> {
    let view = query_handlers::get_game_by_id(game_id, &*state.game_repository).await?;
    Ok(Json(view))
}

/// GET /{game_id}/moves
#[instrument(skip(state))]
async fn list_moves(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<Vec<PlayView>>, ApiError> {
    let moves = query_handlers::list_moves(game_id, &*state.game_repository).await?;
    Ok(Json(moves))
}

/// GET /
#[instrument(skip(state))]
async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListGamesParams>,
) -> Result<Json<Vec<GameView>>, ApiError> {
    let (skip, limit) = page_bounds(params.skip, params.limit);
    let filter = GameFilter {
        finished: params.finished,
        skip,
        limit,
    };
    let games = query_handlers::list_games(&filter, &*state.game_repository).await?;
    Ok(Json(games))
}

/// Returns the router for the game context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games).post(start_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/moves", get(list_moves).post(apply_move))
}
