//! Shared application state.

use std::sync::Arc;

use tictactoe_core::clock::Clock;
use tictactoe_core::repository::{GameRepository, PlayerRegistry};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of timestamps for new games, plays and players.
    pub clock: Arc<dyn Clock>,
    /// Game and play storage.
    pub game_repository: Arc<dyn GameRepository>,
    /// Registered players.
    pub player_registry: Arc<dyn PlayerRegistry>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        game_repository: Arc<dyn GameRepository>,
        player_registry: Arc<dyn PlayerRegistry>,
    ) -> Self {
        Self {
            clock,
            game_repository,
            player_registry,
        }
    }
}
