//! Command handlers for the player registry context.

use tictactoe_core::clock::Clock;
use tictactoe_core::command::Command;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{PlayerRecord, PlayerRegistry};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::query_handlers::PlayerView;
use crate::domain::commands::RegisterPlayer;
use crate::domain::name::validate_player_name;

/// Handles the `RegisterPlayer` command: validates the name and stores a
/// new player under a fresh identity.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is invalid or already
/// registered, or the registry's error if the insert fails.
pub async fn handle_register_player(
    command: &RegisterPlayer,
    clock: &dyn Clock,
    registry: &dyn PlayerRegistry,
) -> Result<PlayerView, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "registering player"
    );

    let name = validate_player_name(&command.name)?;
    if registry.find_by_name(&name).await?.is_some() {
        return Err(DomainError::Validation(format!(
            "player name {name:?} is already registered"
        )));
    }

    let player = PlayerRecord {
        player_id: Uuid::new_v4(),
        name,
        created_at: clock.now(),
    };
    registry.register(&player).await?;

    info!(player_id = %player.player_id, "player registered");
    Ok(PlayerView::from(player))
}

/// Resolves a display name to a registered player, registering the name on
/// first use.
///
/// `name` must already be validated. If another request registers the same
/// name between the lookup and the insert, the player it registered is
/// returned.
///
/// # Errors
///
/// Returns the registry's error if the lookup or the insert fails.
pub async fn resolve_or_register(
    name: &str,
    clock: &dyn Clock,
    registry: &dyn PlayerRegistry,
) -> Result<PlayerRecord, DomainError> {
    if let Some(player) = registry.find_by_name(name).await? {
        return Ok(player);
    }

    let player = PlayerRecord {
        player_id: Uuid::new_v4(),
        name: name.to_owned(),
        created_at: clock.now(),
    };
    match registry.register(&player).await {
        Ok(()) => {
            info!(player_id = %player.player_id, name, "registered player on first game");
            Ok(player)
        }
        Err(DomainError::Validation(reason)) => match registry.find_by_name(name).await? {
            Some(winner) => {
                debug!(player_id = %winner.player_id, name, "name registered concurrently");
                Ok(winner)
            }
            None => Err(DomainError::Validation(reason)),
        },
        Err(e) => Err(e),
    }
}
