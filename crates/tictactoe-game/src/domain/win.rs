//! Win detection.

use tracing::instrument;

use super::aggregates::Participant;
use super::board::Board;

/// Fewest moves after which any line can be complete.
pub const MIN_MOVES_FOR_WIN: i32 = 5;

/// The eight lines over the row-major flattened board.
const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the player whose mark fills a complete line, if any.
///
/// Players are checked in seat order and, for each, lines in the order of
/// `LINES`; the first match is returned.
#[instrument(skip_all)]
pub fn detect_winner<'a>(board: &Board, players: &'a [Participant; 2]) -> Option<&'a Participant> {
    let cells = board.flatten();
    players.iter().find(|player| {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| cells[i] == Some(player.mark)))
    })
}
