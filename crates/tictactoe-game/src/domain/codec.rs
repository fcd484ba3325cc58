//! Board codec: the persisted text form of the grid.
//!
//! A board is stored as a JSON array of three rows, each an array of three
//! cells holding either a one-character string or `null`:
//!
//! ```text
//! [["X",null,null],[null,"O",null],[null,null,null]]
//! ```

use tictactoe_core::error::DomainError;

use super::board::{BOARD_SIZE, Board, Mark};

/// Encodes a board into its persisted text form.
#[must_use]
pub fn encode(board: &Board) -> String {
    // Serializing a fixed grid of chars cannot fail.
    serde_json::to_string(board.rows()).expect("board serialization is infallible")
}

/// Decodes a board from its persisted text form.
///
/// # Errors
///
/// Returns `DomainError::CorruptBoard` if the text is not JSON, is not a
/// 3x3 array, or contains a cell that is not a single character or `null`.
pub fn decode(text: &str) -> Result<Board, DomainError> {
    let raw: Vec<Vec<Option<String>>> = serde_json::from_str(text)
        .map_err(|e| DomainError::CorruptBoard(format!("board is not a grid of strings: {e}")))?;

    if raw.len() != BOARD_SIZE {
        return Err(DomainError::CorruptBoard(format!(
            "expected {BOARD_SIZE} rows, found {}",
            raw.len()
        )));
    }

    let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in raw.iter().enumerate() {
        if row.len() != BOARD_SIZE {
            return Err(DomainError::CorruptBoard(format!(
                "row {r} has {} cells, expected {BOARD_SIZE}",
                row.len()
            )));
        }
        for (c, cell) in row.iter().enumerate() {
            cells[r][c] = match cell.as_deref() {
                None => None,
                Some(text) => Some(decode_mark(text).ok_or_else(|| {
                    DomainError::CorruptBoard(format!(
                        "cell ({r}, {c}) holds {text:?}, expected a single character"
                    ))
                })?),
            };
        }
    }

    Ok(Board::from_rows(cells))
}

fn decode_mark(text: &str) -> Option<Mark> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(Mark::new(symbol)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Coordinate;

    #[test]
    fn test_encode_empty_board_uses_null_cells() {
        assert_eq!(
            encode(&Board::new()),
            "[[null,null,null],[null,null,null],[null,null,null]]"
        );
    }

    #[test]
    fn test_encode_places_marks_row_major() {
        let mut board = Board::new();
        board.place(Coordinate::from_api(1, 1).unwrap(), Mark::X);
        board.place(Coordinate::from_api(2, 2).unwrap(), Mark::O);

        assert_eq!(
            encode(&board),
            r#"[["X",null,null],[null,"O",null],[null,null,null]]"#
        );
    }

    #[test]
    fn test_decode_inverts_encode() {
        let mut board = Board::new();
        board.place(Coordinate::from_api(3, 1).unwrap(), Mark::new('#'));
        board.place(Coordinate::from_api(1, 3).unwrap(), Mark::X);

        assert_eq!(decode(&encode(&board)).unwrap(), board);
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        let cases = [
            "not json",
            "[]",
            "[[null,null,null],[null,null,null]]",
            "[[null,null],[null,null,null],[null,null,null]]",
            r#"[["XX",null,null],[null,null,null],[null,null,null]]"#,
            r#"[["",null,null],[null,null,null],[null,null,null]]"#,
            "[[1,null,null],[null,null,null],[null,null,null]]",
        ];

        for text in cases {
            match decode(text) {
                Err(DomainError::CorruptBoard(_)) => {}
                other => panic!("expected CorruptBoard for {text:?}, got {other:?}"),
            }
        }
    }
}
