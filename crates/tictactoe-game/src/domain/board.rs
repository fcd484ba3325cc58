//! Board, marks and coordinates.

use std::fmt;

use serde::{Serialize, Serializer};
use tictactoe_core::error::DomainError;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A player's single-character symbol, stored upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark(char);

impl Mark {
    /// Default mark of the first seat.
    pub const X: Self = Self('X');
    /// Default mark of the second seat.
    pub const O: Self = Self('O');

    /// Creates a mark from a character, upper-casing it when the upper-case
    /// form is itself a single character.
    #[must_use]
    pub fn new(symbol: char) -> Self {
        let mut upper = symbol.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => Self(single),
            _ => Self(symbol),
        }
    }

    /// Parses a mark from user input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `text` is exactly one
    /// non-whitespace character.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) if !symbol.is_whitespace() => Ok(Self::new(symbol)),
            _ => Err(DomainError::Validation(format!(
                "mark must be a single non-whitespace character, got {text:?}"
            ))),
        }
    }

    /// Returns the underlying character.
    #[must_use]
    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.0)
    }
}

/// A 0-indexed cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    row: usize,
    column: usize,
}

impl Coordinate {
    /// Converts 1-indexed API coordinates into an internal position.
    /// Returns `None` when either value is outside `1..=3`.
    #[must_use]
    pub fn from_api(row: i32, column: i32) -> Option<Self> {
        let to_index = |value: i32| {
            usize::try_from(value)
                .ok()
                .filter(|v| (1..=BOARD_SIZE).contains(v))
                .map(|v| v - 1)
        };
        Some(Self {
            row: to_index(row)?,
            column: to_index(column)?,
        })
    }

    /// Row index, `0..3`.
    #[must_use]
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index, `0..3`.
    #[must_use]
    pub fn column(self) -> usize {
        self.column
    }

    /// Row-major flat index, `0..9`.
    #[must_use]
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.column
    }
}

/// The 3x3 grid. Cells are `None` until marked and never overwritten
/// through the game aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit rows.
    #[must_use]
    pub fn from_rows(cells: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Returns the mark at a position, if any.
    #[must_use]
    pub fn get(&self, at: Coordinate) -> Option<Mark> {
        self.cells[at.row][at.column]
    }

    /// Places a mark. Callers check occupancy first.
    pub(crate) fn place(&mut self, at: Coordinate, mark: Mark) {
        self.cells[at.row][at.column] = Some(mark);
    }

    /// Returns the rows of the grid.
    #[must_use]
    pub fn rows(&self) -> &[[Option<Mark>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Flattens the grid row-major into cells `0..9`.
    #[must_use]
    pub fn flatten(&self) -> [Option<Mark>; CELL_COUNT] {
        let mut flat = [None; CELL_COUNT];
        for (i, cell) in self.cells.iter().flatten().enumerate() {
            flat[i] = *cell;
        }
        flat
    }

    /// Number of marked cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}
