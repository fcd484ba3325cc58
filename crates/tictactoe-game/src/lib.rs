//! Tic-Tac-Toe — game rules engine.
//!
//! Responsible for starting matches, validating and applying moves,
//! detecting a winning line or a draw, and rotating turns. Storage is
//! reached only through the repository traits in `tictactoe-core`.

pub mod application;
pub mod domain;
