//! Commands for the player registry context.

use tictactoe_core::command::Command;
use uuid::Uuid;

/// Command to register a player under a display name.
#[derive(Debug, Clone)]
pub struct RegisterPlayer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested display name.
    pub name: String,
}

impl Command for RegisterPlayer {
    fn command_type(&self) -> &'static str {
        "players.register_player"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
