//! Tic-Tac-Toe — player registry context.
//!
//! Responsible for registering players under a unique display name and
//! looking them up by id or name.

pub mod application;
pub mod domain;
