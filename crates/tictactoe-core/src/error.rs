//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Reasons a move cannot be applied to the current game state.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The game already has a winner or a full board.
    #[error("game is already finished")]
    GameFinished,

    /// Someone other than the player holding the turn tried to move.
    #[error("it is not {player}'s turn; next turn belongs to {expected}")]
    OutOfTurn {
        /// The player who submitted the move.
        player: String,
        /// The player whose turn it is.
        expected: String,
    },

    /// Row or column falls outside `1..=3`.
    #[error("coordinate ({row}, {column}) is outside the board, which spans 1 to 3")]
    InvalidCoordinate {
        /// Submitted row (1-indexed).
        row: i32,
        /// Submitted column (1-indexed).
        column: i32,
    },

    /// The targeted cell already holds a mark.
    #[error("cell ({row}, {column}) is already occupied")]
    CellOccupied {
        /// Submitted row (1-indexed).
        row: i32,
        /// Submitted column (1-indexed).
        column: i32,
    },
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A game was not found.
    #[error("game not found: {0}")]
    GameNotFound(Uuid),

    /// A player was not found (by id or by name).
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    /// A malformed start-game or registration request.
    #[error("validation error: {0}")]
    Validation(String),

    /// The move cannot legally be applied in the current state.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    /// Persisted board text failed to decode.
    #[error("corrupt board: {0}")]
    CorruptBoard(String),

    /// Optimistic concurrency conflict on `movements_played`.
    #[error("concurrency conflict on game {game_id}: expected {expected} moves, found {actual}")]
    ConcurrencyConflict {
        /// The game that had the conflict.
        game_id: Uuid,
        /// The move count read before the update.
        expected: i32,
        /// The move count found in the store.
        actual: i32,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
