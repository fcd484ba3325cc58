//! Domain model and rules for a single match.

pub mod aggregates;
pub mod board;
pub mod codec;
pub mod commands;
pub mod turn;
pub mod validation;
pub mod win;
