//! Query handlers for the game context.
//!
//! This module contains query handlers that load games and their play log
//! and return read-only view DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{GameFilter, GameRepository, PlayRecord};
use tracing::warn;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::{Game, Participant};
use crate::domain::board::{Board, Mark};

/// Read-only view of a seated player.
#[derive(Debug, Serialize)]
pub struct SeatView {
    /// Registry identity.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
    /// The player's mark.
    pub mark: Mark,
}

/// Read-only view of a game.
#[derive(Debug, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Both players, in seat order.
    pub players: Vec<SeatView>,
    /// The grid as three rows of marks or `null`.
    pub board: Board,
    /// Number of accepted moves.
    pub movements_played: i32,
    /// Name of the player whose turn it is.
    pub next_turn: String,
    /// Name of the winner, if any.
    pub winner: Option<String>,
    /// Whether the game has ended.
    pub finished: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last accepted move.
    pub updated_at: DateTime<Utc>,
}

impl From<&Participant> for SeatView {
    fn from(participant: &Participant) -> Self {
        Self {
            player_id: participant.player_id,
            name: participant.name.clone(),
            mark: participant.mark,
        }
    }
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.id,
            players: game.players().iter().map(SeatView::from).collect(),
            board: *game.board(),
            movements_played: game.movements_played(),
            next_turn: game.next_turn().to_owned(),
            winner: game.winner().map(str::to_owned),
            finished: game.is_finished(),
            created_at: game.created_at(),
            updated_at: game.updated_at(),
        }
    }
}

/// Read-only view of one accepted move.
#[derive(Debug, Serialize)]
pub struct PlayView {
    /// The play identifier.
    pub play_id: Uuid,
    /// The game the play belongs to.
    pub game_id: Uuid,
    /// The player who moved.
    pub player_id: Uuid,
    /// Row, 1-indexed.
    pub row: i32,
    /// Column, 1-indexed.
    pub column: i32,
    /// Position of the play within the game.
    pub sequence: i32,
    /// When the play was made.
    pub created_at: DateTime<Utc>,
}

impl From<PlayRecord> for PlayView {
    fn from(play: PlayRecord) -> Self {
        Self {
            play_id: play.play_id,
            game_id: play.game_id,
            player_id: play.player_id,
            row: play.row,
            column: play.column,
            sequence: play.sequence,
            created_at: play.created_at,
        }
    }
}

/// Retrieves a game by its ID.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if the game does not exist.
/// Returns `DomainError::CorruptBoard` if its stored board cannot be decoded.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn GameRepository,
) -> Result<GameView, DomainError> {
    let game = command_handlers::load_game(game_id, repo).await?;
    Ok(GameView::from(&game))
}

/// Lists the moves of a game in the order they were played.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if the game does not exist.
pub async fn list_moves(
    game_id: Uuid,
    repo: &dyn GameRepository,
) -> Result<Vec<PlayView>, DomainError> {
    if repo.load_game(game_id).await?.is_none() {
        return Err(DomainError::GameNotFound(game_id));
    }
    let mut plays = repo.load_plays(game_id).await?;
    plays.sort_by_key(|p| p.sequence);
    Ok(plays.into_iter().map(PlayView::from).collect())
}

/// Lists games matching `filter`.
///
/// A game whose stored state cannot be reconstituted is logged and left out
/// of the page; fetching it by id still reports the corruption.
///
/// # Errors
///
/// Returns the repository's error.
pub async fn list_games(
    filter: &GameFilter,
    repo: &dyn GameRepository,
) -> Result<Vec<GameView>, DomainError> {
    let records = repo.list_games(filter).await?;
    Ok(records
        .iter()
        .filter_map(|record| match Game::reconstitute(record) {
            Ok(game) => Some(GameView::from(&game)),
            Err(e) => {
                warn!(game_id = %record.game_id, error = %e, "skipping unreadable game");
                None
            }
        })
        .collect())
}
