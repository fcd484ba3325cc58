//! `PostgreSQL` implementation of the `GameRepository` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{GameFilter, GameRecord, GameRepository, PlayRecord, SeatRecord};

use crate::error::{infrastructure, is_unique_violation};

const GAME_COLUMNS: &str = "game_id, board, movements_played, next_turn, winner, finished, \
                            created_at, updated_at";

/// PostgreSQL-backed game repository.
#[derive(Debug, Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    /// Creates a new `PgGameRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reads the stored move count, or `None` if the game does not exist.
    async fn current_movements_played(
        tx: &mut Transaction<'_, Postgres>,
        game_id: Uuid,
    ) -> Result<Option<i32>, DomainError> {
        sqlx::query_scalar("SELECT movements_played FROM games WHERE game_id = $1")
            .bind(game_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(infrastructure)
    }
}

fn game_from_row(row: &PgRow, players: Vec<SeatRecord>) -> Result<GameRecord, sqlx::Error> {
    Ok(GameRecord {
        game_id: row.try_get("game_id")?,
        players,
        board: row.try_get("board")?,
        movements_played: row.try_get("movements_played")?,
        next_turn: row.try_get("next_turn")?,
        winner: row.try_get("winner")?,
        finished: row.try_get("finished")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn seat_from_row(row: &PgRow) -> Result<SeatRecord, sqlx::Error> {
    Ok(SeatRecord {
        player_id: row.try_get("player_id")?,
        name: row.try_get("name")?,
        mark: row.try_get("mark")?,
    })
}

fn play_from_row(row: &PgRow) -> Result<PlayRecord, sqlx::Error> {
    Ok(PlayRecord {
        play_id: row.try_get("play_id")?,
        game_id: row.try_get("game_id")?,
        player_id: row.try_get("player_id")?,
        row: row.try_get("board_row")?,
        column: row.try_get("board_column")?,
        sequence: row.try_get("sequence")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn create_game(&self, game: &GameRecord) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        sqlx::query(
            "INSERT INTO games (game_id, board, movements_played, next_turn, winner, finished, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(game.game_id)
        .bind(&game.board)
        .bind(game.movements_played)
        .bind(&game.next_turn)
        .bind(&game.winner)
        .bind(game.finished)
        .bind(game.created_at)
        .bind(game.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(infrastructure)?;

        for (seat, player) in (0_i16..).zip(&game.players) {
            sqlx::query(
                "INSERT INTO game_players (game_id, seat, player_id, name, mark) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(game.game_id)
            .bind(seat)
            .bind(player.player_id)
            .bind(&player.name)
            .bind(&player.mark)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?;
        }

        tx.commit().await.map_err(infrastructure)?;
        debug!(game_id = %game.game_id, "game created");
        Ok(())
    }

    async fn load_game(&self, game_id: Uuid) -> Result<Option<GameRecord>, DomainError> {
        let Some(row) = sqlx::query(&format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = $1"))
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?
        else {
            return Ok(None);
        };

        let players = sqlx::query(
            "SELECT player_id, name, mark FROM game_players WHERE game_id = $1 ORDER BY seat",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        .iter()
        .map(seat_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(infrastructure)?;

        game_from_row(&row, players)
            .map(Some)
            .map_err(infrastructure)
    }

    async fn save_game(
        &self,
        game: &GameRecord,
        expected_movements_played: i32,
        play: &PlayRecord,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        let updated = sqlx::query(
            "UPDATE games SET board = $2, movements_played = $3, next_turn = $4, winner = $5, \
             finished = $6, updated_at = $7 WHERE game_id = $1 AND movements_played = $8",
        )
        .bind(game.game_id)
        .bind(&game.board)
        .bind(game.movements_played)
        .bind(&game.next_turn)
        .bind(&game.winner)
        .bind(game.finished)
        .bind(game.updated_at)
        .bind(expected_movements_played)
        .execute(&mut *tx)
        .await
        .map_err(infrastructure)?;

        if updated.rows_affected() == 0 {
            return match Self::current_movements_played(&mut tx, game.game_id).await? {
                None => Err(DomainError::GameNotFound(game.game_id)),
                Some(actual) => {
                    warn!(
                        game_id = %game.game_id,
                        expected = expected_movements_played,
                        actual,
                        "stale game update rejected"
                    );
                    Err(DomainError::ConcurrencyConflict {
                        game_id: game.game_id,
                        expected: expected_movements_played,
                        actual,
                    })
                }
            };
        }

        let inserted = sqlx::query(
            "INSERT INTO plays (play_id, game_id, player_id, board_row, board_column, sequence, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(play.play_id)
        .bind(play.game_id)
        .bind(play.player_id)
        .bind(play.row)
        .bind(play.column)
        .bind(play.sequence)
        .bind(play.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::ConcurrencyConflict {
                    game_id: game.game_id,
                    expected: expected_movements_played,
                    actual: play.sequence,
                });
            }
            Err(e) => return Err(infrastructure(e)),
        }

        tx.commit().await.map_err(infrastructure)?;
        debug!(
            game_id = %game.game_id,
            movements_played = game.movements_played,
            "game saved"
        );
        Ok(())
    }

    async fn load_plays(&self, game_id: Uuid) -> Result<Vec<PlayRecord>, DomainError> {
        sqlx::query(
            "SELECT play_id, game_id, player_id, board_row, board_column, sequence, created_at \
             FROM plays WHERE game_id = $1 ORDER BY sequence",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        .iter()
        .map(play_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(infrastructure)
    }

    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {GAME_COLUMNS} FROM games \
             WHERE ($1::BOOLEAN IS NULL OR finished = $1) \
             ORDER BY created_at, game_id OFFSET $2 LIMIT $3"
        ))
        .bind(filter.finished)
        .bind(filter.skip.max(0))
        .bind(filter.limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.try_get("game_id"))
            .collect::<Result<_, _>>()
            .map_err(infrastructure)?;

        let mut seats: HashMap<Uuid, Vec<SeatRecord>> = HashMap::new();
        for row in sqlx::query(
            "SELECT game_id, player_id, name, mark FROM game_players \
             WHERE game_id = ANY($1) ORDER BY game_id, seat",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        {
            let game_id: Uuid = row.try_get("game_id").map_err(infrastructure)?;
            seats
                .entry(game_id)
                .or_default()
                .push(seat_from_row(&row).map_err(infrastructure)?);
        }

        rows.iter()
            .zip(ids)
            .map(|(row, id)| game_from_row(row, seats.remove(&id).unwrap_or_default()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(infrastructure)
    }
}
