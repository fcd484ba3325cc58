//! Test repositories — in-memory and failing implementations of the
//! repository traits.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{
    GameFilter, GameRecord, GameRepository, PlayRecord, PlayerRecord, PlayerRegistry,
};
use uuid::Uuid;

use crate::clock::FixedClock;

#[derive(Debug, Default)]
struct GameTables {
    games: Vec<GameRecord>,
    plays: Vec<PlayRecord>,
}

/// A game repository backed by vectors behind a mutex. Honors the
/// optimistic `movements_played` check the same way the PostgreSQL store
/// does, and keeps games in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    tables: Mutex<GameTables>,
}

impl InMemoryGameRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the stored game, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn game(&self, game_id: Uuid) -> Option<GameRecord> {
        self.tables
            .lock()
            .unwrap()
            .games
            .iter()
            .find(|g| g.game_id == game_id)
            .cloned()
    }

    /// Returns a snapshot of the plays stored for a game, in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn plays(&self, game_id: Uuid) -> Vec<PlayRecord> {
        self.tables
            .lock()
            .unwrap()
            .plays
            .iter()
            .filter(|p| p.game_id == game_id)
            .cloned()
            .collect()
    }

    /// Overwrites a stored game without any checks. Used to plant corrupt
    /// records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn replace(&self, record: GameRecord) {
        let mut tables = self.tables.lock().unwrap();
        match tables.games.iter_mut().find(|g| g.game_id == record.game_id) {
            Some(slot) => *slot = record,
            None => tables.games.push(record),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: &GameRecord) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.games.iter().any(|g| g.game_id == game.game_id) {
            return Err(DomainError::Infrastructure(format!(
                "game {} already exists",
                game.game_id
            )));
        }
        tables.games.push(game.clone());
        Ok(())
    }

    async fn load_game(&self, game_id: Uuid) -> Result<Option<GameRecord>, DomainError> {
        Ok(self.game(game_id))
    }

    async fn save_game(
        &self,
        game: &GameRecord,
        expected_movements_played: i32,
        play: &PlayRecord,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .games
            .iter_mut()
            .find(|g| g.game_id == game.game_id)
            .ok_or(DomainError::GameNotFound(game.game_id))?;

        if stored.movements_played != expected_movements_played {
            return Err(DomainError::ConcurrencyConflict {
                game_id: game.game_id,
                expected: expected_movements_played,
                actual: stored.movements_played,
            });
        }

        *stored = game.clone();
        tables.plays.push(play.clone());
        Ok(())
    }

    async fn load_plays(&self, game_id: Uuid) -> Result<Vec<PlayRecord>, DomainError> {
        Ok(self.plays(game_id))
    }

    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .games
            .iter()
            .filter(|g| filter.finished.is_none_or(|finished| g.finished == finished))
            .skip(usize::try_from(filter.skip).unwrap_or(0))
            .take(usize::try_from(filter.limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

/// A player registry backed by a vector behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryPlayerRegistry {
    players: Mutex<Vec<PlayerRecord>>,
}

impl InMemoryPlayerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRegistry for InMemoryPlayerRegistry {
    async fn register(&self, player: &PlayerRecord) -> Result<(), DomainError> {
        let mut players = self.players.lock().unwrap();
        if players.iter().any(|p| p.name == player.name) {
            return Err(DomainError::Validation(format!(
                "player name {:?} is already registered",
                player.name
            )));
        }
        players.push(player.clone());
        Ok(())
    }

    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<PlayerRecord>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<PlayerRecord>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

/// A player registry where another request registers `contested` right
/// after the first lookup of that name misses. The first `find_by_name` for
/// it returns `None` even though the name is taken by the time it returns.
#[derive(Debug)]
pub struct RacingPlayerRegistry {
    inner: InMemoryPlayerRegistry,
    contested: String,
    raced: AtomicBool,
}

impl RacingPlayerRegistry {
    /// Create an empty registry that races on `contested`.
    #[must_use]
    pub fn new(contested: &str) -> Self {
        Self {
            inner: InMemoryPlayerRegistry::new(),
            contested: contested.to_owned(),
            raced: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl PlayerRegistry for RacingPlayerRegistry {
    async fn register(&self, player: &PlayerRecord) -> Result<(), DomainError> {
        self.inner.register(player).await
    }

    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<PlayerRecord>, DomainError> {
        self.inner.find_by_id(player_id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, DomainError> {
        if name == self.contested && !self.raced.swap(true, Ordering::SeqCst) {
            let rival = PlayerRecord {
                player_id: Uuid::new_v4(),
                name: name.to_owned(),
                created_at: FixedClock::default().0,
            };
            self.inner.register(&rival).await?;
            return Ok(None);
        }
        self.inner.find_by_name(name).await
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<PlayerRecord>, DomainError> {
        self.inner.list(skip, limit).await
    }
}

/// A game repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingGameRepository;

#[async_trait]
impl GameRepository for FailingGameRepository {
    async fn create_game(&self, _game: &GameRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_game(&self, _game_id: Uuid) -> Result<Option<GameRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save_game(
        &self,
        _game: &GameRecord,
        _expected_movements_played: i32,
        _play: &PlayRecord,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_plays(&self, _game_id: Uuid) -> Result<Vec<PlayRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_games(&self, _filter: &GameFilter) -> Result<Vec<GameRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A player registry that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingPlayerRegistry;

#[async_trait]
impl PlayerRegistry for FailingPlayerRegistry {
    async fn register(&self, _player: &PlayerRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_id(&self, _player_id: Uuid) -> Result<Option<PlayerRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<PlayerRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self, _skip: i64, _limit: i64) -> Result<Vec<PlayerRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
