//! The game aggregate.

use chrono::{DateTime, Utc};
use tictactoe_core::clock::Clock;
use tictactoe_core::error::DomainError;
use tictactoe_core::repository::{GameRecord, PlayRecord, SeatRecord};
use uuid::Uuid;

use super::board::{Board, CELL_COUNT, Mark};
use super::win::{MIN_MOVES_FOR_WIN, detect_winner};
use super::{codec, turn, validation};

/// Move count at which every cell is marked.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const FULL_BOARD_MOVES: i32 = CELL_COUNT as i32;

/// A player seated in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Registry identity.
    pub player_id: Uuid,
    /// Display name, unique within the game.
    pub name: String,
    /// The mark this player places.
    pub mark: Mark,
}

impl Participant {
    /// Creates a participant.
    #[must_use]
    pub fn new(player_id: Uuid, name: String, mark: Mark) -> Self {
        Self {
            player_id,
            name,
            mark,
        }
    }
}

/// The aggregate root for a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Aggregate identifier.
    pub id: Uuid,
    /// The two seats, fixed for the game's lifetime.
    pub(crate) players: [Participant; 2],
    /// Current grid.
    pub(crate) board: Board,
    /// Number of accepted moves.
    pub(crate) movements_played: i32,
    /// Name of the player to move.
    pub(crate) next_turn: String,
    /// Name of the winner, once there is one.
    pub(crate) winner: Option<String>,
    /// Whether the game has ended.
    pub(crate) finished: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Game {
    /// Starts a new game on an empty board.
    ///
    /// The first move goes to `starting_player` when it names one of the two
    /// participants, otherwise to the first seat.
    #[must_use]
    pub fn start(
        id: Uuid,
        players: [Participant; 2],
        starting_player: Option<&str>,
        clock: &dyn Clock,
    ) -> Self {
        let next_turn = starting_player
            .filter(|name| turn::seat_of(&players, name).is_some())
            .unwrap_or(players[0].name.as_str())
            .to_owned();
        let now = clock.now();

        Self {
            id,
            players,
            board: Board::new(),
            movements_played: 0,
            next_turn,
            winner: None,
            finished: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a move by `player_name` at 1-indexed `(row, column)`.
    ///
    /// Nothing is mutated unless the move passes validation. On success the
    /// board, move count, turn, winner and finished flag are all updated and
    /// the play to append to the log is returned.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalMove` if the move is rejected.
    pub fn apply_move(
        &mut self,
        player_name: &str,
        row: i32,
        column: i32,
        clock: &dyn Clock,
    ) -> Result<PlayRecord, DomainError> {
        let at = validation::validate_move(self, player_name, row, column)?;

        let unseated = || {
            DomainError::Infrastructure(format!(
                "player {player_name} holds the turn but is not seated in game {}",
                self.id
            ))
        };
        let mover = self.participant(player_name).ok_or_else(unseated)?;
        let next_turn = turn::next_turn(&self.players, player_name)
            .ok_or_else(unseated)?
            .name
            .clone();

        let mut board = self.board;
        board.place(at, mover.mark);
        let movements_played = self.movements_played + 1;

        let winner = if movements_played >= MIN_MOVES_FOR_WIN {
            detect_winner(&board, &self.players).map(|p| p.name.clone())
        } else {
            None
        };
        // A line completed on the last free cell is a win, not a draw.
        let finished = winner.is_some() || movements_played == FULL_BOARD_MOVES;

        let now = clock.now();
        let play = PlayRecord {
            play_id: Uuid::new_v4(),
            game_id: self.id,
            player_id: mover.player_id,
            row,
            column,
            sequence: movements_played,
            created_at: now,
        };

        self.board = board;
        self.movements_played = movements_played;
        self.next_turn = next_turn;
        self.winner = winner;
        self.finished = finished;
        self.updated_at = now;

        Ok(play)
    }

    /// The two seats, in order.
    #[must_use]
    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    /// The current grid.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of accepted moves.
    #[must_use]
    pub fn movements_played(&self) -> i32 {
        self.movements_played
    }

    /// Name of the player whose turn it is.
    #[must_use]
    pub fn next_turn(&self) -> &str {
        &self.next_turn
    }

    /// Name of the winner, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Whether the game has ended in a win or a draw.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last accepted move.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the participant with the given name.
    #[must_use]
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        turn::seat_of(&self.players, name).map(|seat| &self.players[seat])
    }

    /// Converts the aggregate into its stored representation.
    #[must_use]
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            game_id: self.id,
            players: self
                .players
                .iter()
                .map(|p| SeatRecord {
                    player_id: p.player_id,
                    name: p.name.clone(),
                    mark: p.mark.to_string(),
                })
                .collect(),
            board: codec::encode(&self.board),
            movements_played: self.movements_played,
            next_turn: self.next_turn.clone(),
            winner: self.winner.clone(),
            finished: self.finished,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Rebuilds the aggregate from its stored representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptBoard` if the board text does not decode
    /// or disagrees with `movements_played`, and
    /// `DomainError::Infrastructure` if the seats are malformed.
    pub fn reconstitute(record: &GameRecord) -> Result<Self, DomainError> {
        let [first, second] = record.players.as_slice() else {
            return Err(DomainError::Infrastructure(format!(
                "game {} has {} seats, expected 2",
                record.game_id,
                record.players.len()
            )));
        };
        let players = [to_participant(first)?, to_participant(second)?];

        let board = codec::decode(&record.board)?;
        let occupied = board.occupied_count();
        if usize::try_from(record.movements_played).ok() != Some(occupied) {
            return Err(DomainError::CorruptBoard(format!(
                "game {} records {} movements but the board holds {occupied} marks",
                record.game_id, record.movements_played
            )));
        }

        if turn::seat_of(&players, &record.next_turn).is_none() {
            return Err(DomainError::Infrastructure(format!(
                "game {} gives the turn to unseated player {}",
                record.game_id, record.next_turn
            )));
        }

        Ok(Self {
            id: record.game_id,
            players,
            board,
            movements_played: record.movements_played,
            next_turn: record.next_turn.clone(),
            winner: record.winner.clone(),
            finished: record.finished || record.winner.is_some(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn to_participant(seat: &SeatRecord) -> Result<Participant, DomainError> {
    let mark = Mark::parse(&seat.mark).map_err(|e| {
        DomainError::Infrastructure(format!("stored mark for {} is invalid: {e}", seat.name))
    })?;
    Ok(Participant::new(seat.player_id, seat.name.clone(), mark))
}
