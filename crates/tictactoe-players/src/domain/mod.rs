//! Domain model for registered players.

pub mod commands;
pub mod name;
