//! Preconditions for starting a game and for applying a move.
//!
//! Both checks are pure: they inspect state and input and never mutate.

use tictactoe_core::error::{DomainError, IllegalMove};
use tictactoe_players::domain::name::validate_player_name;

use super::aggregates::Game;
use super::board::{Coordinate, Mark};
use super::commands::SeatRequest;

/// Marks handed out, by seat, to players that did not ask for one.
const DEFAULT_MARKS: [Mark; 2] = [Mark::X, Mark::O];

/// Validates a start-game lineup and assigns marks.
///
/// Returns the two `(name, mark)` pairs in seat order.
///
/// # Errors
///
/// Returns `DomainError::Validation` if there are not exactly two players,
/// if their names are blank or equal, if a requested mark is not a single
/// character, or if both players end up with the same mark.
pub fn validate_lineup(requests: &[SeatRequest]) -> Result<[(String, Mark); 2], DomainError> {
    let [first, second] = requests else {
        return Err(DomainError::Validation(format!(
            "a game needs exactly two players, got {}",
            requests.len()
        )));
    };

    let names = [
        validate_player_name(&first.name)?,
        validate_player_name(&second.name)?,
    ];
    if names[0] == names[1] {
        return Err(DomainError::Validation(format!(
            "player names must be distinct, both are {:?}",
            names[0]
        )));
    }

    let mut marks = DEFAULT_MARKS;
    for (seat, request) in [first, second].into_iter().enumerate() {
        if let Some(requested) = &request.mark {
            marks[seat] = Mark::parse(requested)?;
        }
    }
    if same_mark(marks[0], marks[1]) {
        return Err(DomainError::Validation(format!(
            "players must use different marks, both would be {}",
            marks[0]
        )));
    }

    let [first_name, second_name] = names;
    Ok([(first_name, marks[0]), (second_name, marks[1])])
}

/// Marks compare case-insensitively, including symbols that have no
/// single-character upper-case form.
fn same_mark(a: Mark, b: Mark) -> bool {
    a.symbol().to_lowercase().eq(b.symbol().to_lowercase())
}

/// Checks a candidate move against the current game state.
///
/// Checks run in a fixed priority order: finished game, turn, coordinate
/// range, then cell occupancy. On success returns the internal coordinate.
///
/// # Errors
///
/// Returns the first `IllegalMove` that applies.
pub fn validate_move(
    game: &Game,
    player_name: &str,
    row: i32,
    column: i32,
) -> Result<Coordinate, IllegalMove> {
    if game.is_finished() || game.winner().is_some() {
        return Err(IllegalMove::GameFinished);
    }

    if player_name != game.next_turn() {
        return Err(IllegalMove::OutOfTurn {
            player: player_name.to_owned(),
            expected: game.next_turn().to_owned(),
        });
    }

    let at = Coordinate::from_api(row, column)
        .ok_or(IllegalMove::InvalidCoordinate { row, column })?;

    if game.board().get(at).is_some() {
        return Err(IllegalMove::CellOccupied { row, column });
    }

    Ok(at)
}
