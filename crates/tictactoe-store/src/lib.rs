//! `PostgreSQL` persistence for games, plays and registered players.
//!
//! Schema lives in the workspace `migrations/` directory.

mod error;
pub mod pg_game_repository;
pub mod pg_player_registry;
