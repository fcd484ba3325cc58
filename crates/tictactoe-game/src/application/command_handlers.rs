//! Command handlers for the game context.
//!
//! Each handler loads what it needs through the repository traits, runs the
//! domain logic, and writes the result back in a single store call.

use tictactoe_core::clock::Clock;
use tictactoe_core::command::Command;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{GameRepository, PlayerRegistry};
use tictactoe_players::application::command_handlers::resolve_or_register;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::aggregates::{Game, Participant};
use crate::domain::commands::{ApplyMove, StartGame};
use crate::domain::validation;

/// Loads and reconstitutes a game.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if the game does not exist, and
/// `DomainError::CorruptBoard` if its stored board cannot be decoded.
pub(crate) async fn load_game(
    game_id: Uuid,
    repo: &dyn GameRepository,
) -> Result<Game, DomainError> {
    let record = repo
        .load_game(game_id)
        .await?
        .ok_or(DomainError::GameNotFound(game_id))?;
    Game::reconstitute(&record)
}

/// Handles the `StartGame` command: validates the lineup, resolves both
/// players through the registry, and persists a new game.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed lineup, or the
/// repository's error if a lookup or the insert fails.
pub async fn handle_start_game(
    command: &StartGame,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    registry: &dyn PlayerRegistry,
) -> Result<Game, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "starting game"
    );

    let [(first_name, first_mark), (second_name, second_mark)] =
        validation::validate_lineup(&command.players)?;

    let first = resolve_or_register(&first_name, clock, registry).await?;
    let second = resolve_or_register(&second_name, clock, registry).await?;

    let game = Game::start(
        Uuid::new_v4(),
        [
            Participant::new(first.player_id, first_name, first_mark),
            Participant::new(second.player_id, second_name, second_mark),
        ],
        command.starting_player.as_deref(),
        clock,
    );

    games.create_game(&game.to_record()).await?;

    info!(game_id = %game.id, next_turn = game.next_turn(), "game started");
    Ok(game)
}

/// Handles the `ApplyMove` command: loads the game, applies the move, and
/// persists the updated game together with the new play.
///
/// The save is guarded by the move count read at load time, so a racing
/// update surfaces as `DomainError::ConcurrencyConflict` instead of being
/// overwritten.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound`, `DomainError::IllegalMove`,
/// `DomainError::CorruptBoard`, `DomainError::ConcurrencyConflict`, or the
/// repository's error. The stored game is untouched in every error case.
pub async fn handle_apply_move(
    command: &ApplyMove,
    clock: &dyn Clock,
    games: &dyn GameRepository,
) -> Result<Game, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id,
        player = %command.player_name,
        row = command.row,
        column = command.column,
        "applying move"
    );

    let mut game = load_game(command.game_id, games).await?;
    let expected_movements_played = game.movements_played();

    let play = game
        .apply_move(&command.player_name, command.row, command.column, clock)
        .inspect_err(|e| warn!(game_id = %command.game_id, error = %e, "move rejected"))?;

    games
        .save_game(&game.to_record(), expected_movements_played, &play)
        .await?;

    if game.is_finished() {
        match game.winner() {
            Some(winner) => info!(game_id = %game.id, winner, "game won"),
            None => info!(game_id = %game.id, "game drawn"),
        }
    }

    Ok(game)
}
