//! `PostgreSQL` implementation of the `PlayerRegistry` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{PlayerRecord, PlayerRegistry};

use crate::error::{infrastructure, is_unique_violation};

/// PostgreSQL-backed player registry.
#[derive(Debug, Clone)]
pub struct PgPlayerRegistry {
    pool: PgPool,
}

impl PgPlayerRegistry {
    /// Creates a new `PgPlayerRegistry`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn player_from_row(row: &PgRow) -> Result<PlayerRecord, sqlx::Error> {
    Ok(PlayerRecord {
        player_id: row.try_get("player_id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PlayerRegistry for PgPlayerRegistry {
    async fn register(&self, player: &PlayerRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO players (player_id, name, created_at) VALUES ($1, $2, $3)",
        )
        .bind(player.player_id)
        .bind(&player.name)
        .bind(player.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Validation(format!(
                "player name {:?} is already registered",
                player.name
            ))),
            Err(e) => Err(infrastructure(e)),
        }
    }

    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<PlayerRecord>, DomainError> {
        sqlx::query("SELECT player_id, name, created_at FROM players WHERE player_id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?
            .as_ref()
            .map(player_from_row)
            .transpose()
            .map_err(infrastructure)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, DomainError> {
        sqlx::query("SELECT player_id, name, created_at FROM players WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?
            .as_ref()
            .map(player_from_row)
            .transpose()
            .map_err(infrastructure)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<PlayerRecord>, DomainError> {
        sqlx::query(
            "SELECT player_id, name, created_at FROM players \
             ORDER BY created_at, player_id OFFSET $1 LIMIT $2",
        )
        .bind(skip.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        .iter()
        .map(player_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(infrastructure)
    }
}
