//! Commands for the game context.

use tictactoe_core::command::Command;
use uuid::Uuid;

/// One entry of a start-game lineup.
#[derive(Debug, Clone)]
pub struct SeatRequest {
    /// Display name of the player.
    pub name: String,
    /// Requested mark; defaults by seat when absent.
    pub mark: Option<String>,
}

/// Command to start a new game.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The players, in seat order.
    pub players: Vec<SeatRequest>,
    /// Name of the player who moves first, if not the first seat.
    pub starting_player: Option<String>,
}

/// Command to place the submitting player's mark on the board.
#[derive(Debug, Clone)]
pub struct ApplyMove {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game being played.
    pub game_id: Uuid,
    /// Name of the player submitting the move.
    pub player_name: String,
    /// Row, 1-indexed.
    pub row: i32,
    /// Column, 1-indexed.
    pub column: i32,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ApplyMove {
    fn command_type(&self) -> &'static str {
        "game.apply_move"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
