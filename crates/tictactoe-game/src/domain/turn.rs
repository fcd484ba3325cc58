//! Turn rotation between the two seats.

use super::aggregates::Participant;

/// Returns the seat index (0 or 1) of the named player.
#[must_use]
pub fn seat_of(players: &[Participant; 2], name: &str) -> Option<usize> {
    players.iter().position(|p| p.name == name)
}

/// Returns the player who moves after `mover`: the other seat of the pair.
///
/// Returns `None` if `mover` is not seated in the game.
#[must_use]
pub fn next_turn<'a>(players: &'a [Participant; 2], mover: &str) -> Option<&'a Participant> {
    seat_of(players, mover).map(|seat| &players[1 - seat])
}
