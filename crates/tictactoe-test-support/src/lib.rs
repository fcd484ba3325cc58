//! Shared test doubles for the tic-tac-toe match service.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{
    FailingGameRepository, FailingPlayerRegistry, InMemoryGameRepository, InMemoryPlayerRegistry,
    RacingPlayerRegistry,
};
