//! Query handlers for the player registry context.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{MAX_PAGE_SIZE, PlayerRecord, PlayerRegistry};
use uuid::Uuid;

/// Read-only view of a registered player.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    /// The player identifier.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<PlayerRecord> for PlayerView {
    fn from(player: PlayerRecord) -> Self {
        Self {
            player_id: player.player_id,
            name: player.name,
            created_at: player.created_at,
        }
    }
}

/// Retrieves a player by id.
///
/// # Errors
///
/// Returns `DomainError::PlayerNotFound` if no player has the id.
pub async fn get_player_by_id(
    player_id: Uuid,
    registry: &dyn PlayerRegistry,
) -> Result<PlayerView, DomainError> {
    registry
        .find_by_id(player_id)
        .await?
        .map(PlayerView::from)
        .ok_or_else(|| DomainError::PlayerNotFound(player_id.to_string()))
}

/// Retrieves a player by display name.
///
/// # Errors
///
/// Returns `DomainError::PlayerNotFound` if no player has the name.
pub async fn get_player_by_name(
    name: &str,
    registry: &dyn PlayerRegistry,
) -> Result<PlayerView, DomainError> {
    registry
        .find_by_name(name)
        .await?
        .map(PlayerView::from)
        .ok_or_else(|| DomainError::PlayerNotFound(name.to_owned()))
}

/// Lists registered players. `limit` is clamped to `0..=MAX_PAGE_SIZE` and
/// a negative `skip` counts as zero.
///
/// # Errors
///
/// Returns the registry's error if the query fails.
pub async fn list_players(
    skip: i64,
    limit: i64,
    registry: &dyn PlayerRegistry,
) -> Result<Vec<PlayerView>, DomainError> {
    let players = registry
        .list(skip.max(0), limit.clamp(0, MAX_PAGE_SIZE))
        .await?;
    Ok(players.into_iter().map(PlayerView::from).collect())
}
