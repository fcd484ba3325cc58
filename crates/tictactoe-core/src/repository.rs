//! Repository abstractions for games, plays and registered players.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of one of the two seats in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRecord {
    /// Registry identity of the seated player.
    pub player_id: Uuid,
    /// Display name, unique within the game.
    pub name: String,
    /// Single-character mark, upper-cased.
    pub mark: String,
}

/// Stored representation of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Game identifier.
    pub game_id: Uuid,
    /// The two seats, in the order they were given at start.
    pub players: Vec<SeatRecord>,
    /// Encoded board text.
    pub board: String,
    /// Number of accepted moves.
    pub movements_played: i32,
    /// Name of the player whose turn it is.
    pub next_turn: String,
    /// Name of the winning player, if any.
    pub winner: Option<String>,
    /// Whether the game has ended.
    pub finished: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last accepted move (or creation).
    pub updated_at: DateTime<Utc>,
}

/// Stored representation of an accepted move. Never updated once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    /// Play identifier.
    pub play_id: Uuid,
    /// Game the play belongs to.
    pub game_id: Uuid,
    /// Player who made the play.
    pub player_id: Uuid,
    /// Row, 1-indexed.
    pub row: i32,
    /// Column, 1-indexed.
    pub column: i32,
    /// Position of the play within the game, starting at 1.
    pub sequence: i32,
    /// Timestamp of the play.
    pub created_at: DateTime<Utc>,
}

/// Stored representation of a registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Stable player identity.
    pub player_id: Uuid,
    /// Display name, unique across the registry.
    pub name: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Largest page any listing serves, and the page size when none is given.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Filter and paging for game listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameFilter {
    /// Only games whose `finished` flag matches, when set.
    pub finished: Option<bool>,
    /// Number of games to skip.
    pub skip: i64,
    /// Maximum number of games returned.
    pub limit: i64,
}

impl Default for GameFilter {
    fn default() -> Self {
        Self {
            finished: None,
            skip: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

/// Repository trait for game records and their play log.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Persist a newly started game.
    async fn create_game(&self, game: &GameRecord) -> Result<(), DomainError>;

    /// Load a game by id. Returns `Ok(None)` when it does not exist.
    async fn load_game(&self, game_id: Uuid) -> Result<Option<GameRecord>, DomainError>;

    /// Persist an updated game and append its new play as one atomic unit.
    ///
    /// `expected_movements_played` is the move count read when the game was
    /// loaded; if the stored count differs, nothing is written and
    /// `DomainError::ConcurrencyConflict` is returned.
    async fn save_game(
        &self,
        game: &GameRecord,
        expected_movements_played: i32,
        play: &PlayRecord,
    ) -> Result<(), DomainError>;

    /// Load every play of a game, ordered by sequence.
    async fn load_plays(&self, game_id: Uuid) -> Result<Vec<PlayRecord>, DomainError>;

    /// List games ordered by creation time.
    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, DomainError>;
}

/// Repository trait for the player registry.
#[async_trait]
pub trait PlayerRegistry: Send + Sync {
    /// Register a new player. Fails with `DomainError::Validation` if the
    /// name is already taken.
    async fn register(&self, player: &PlayerRecord) -> Result<(), DomainError>;

    /// Look up a player by id.
    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<PlayerRecord>, DomainError>;

    /// Look up a player by display name.
    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, DomainError>;

    /// List players ordered by registration time.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<PlayerRecord>, DomainError>;
}
