//! Tic-Tac-Toe Core — shared domain abstractions.
//!
//! This crate defines the error taxonomy, the clock and command traits,
//! and the repository traits that the game and player contexts depend on.
//! It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod repository;
