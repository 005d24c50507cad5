//! First-class move and sequence types for SOS.
//!
//! Moves are domain events: a proposed [`Move`] is what a player asks for,
//! a [`PlacedMove`] is what the engine accepted and logged.

use super::types::{Coord, GameStatus, Letter, Player};
use serde::{Deserialize, Serialize};

/// A proposed placement: write `letter` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Target row.
    pub row: usize,
    /// Target column.
    pub col: usize,
    /// Letter to write.
    pub letter: Letter,
}

impl Move {
    /// Creates a new move.
    pub fn new(row: usize, col: usize, letter: Letter) -> Self {
        Self { row, col, letter }
    }

    /// Returns the target coordinate.
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.row, self.col, self.letter)
    }
}

/// An accepted placement together with the player who made it.
///
/// This is also the on-disk shape of a recorded move:
/// `{"row": 0, "col": 2, "letter": "S", "player": "blue"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedMove {
    /// Row written.
    pub row: usize,
    /// Column written.
    pub col: usize,
    /// Letter written.
    pub letter: Letter,
    /// Player who held the turn when the letter was written.
    pub player: Player,
}

impl PlacedMove {
    /// Creates a placed move.
    pub fn new(row: usize, col: usize, letter: Letter, player: Player) -> Self {
        Self {
            row,
            col,
            letter,
            player,
        }
    }

    /// Drops the player, leaving the proposal.
    pub fn as_move(&self) -> Move {
        Move::new(self.row, self.col, self.letter)
    }
}

impl std::fmt::Display for PlacedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} at ({}, {})",
            self.player, self.letter, self.row, self.col
        )
    }
}

/// Three collinear, adjacent cells reading S-O-S.
///
/// Cell order follows the scan that found it: an `S` anchor comes first,
/// an `O` anchor sits in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(pub [Coord; 3]);

impl Sequence {
    /// Returns the three cells in order.
    pub fn cells(&self) -> &[Coord; 3] {
        &self.0
    }
}

/// A sequence credited to the player whose move completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSequence {
    /// The cells.
    pub sequence: Sequence,
    /// Who scored it.
    pub owner: Player,
}

/// What happened when a move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The accepted move, with its mover of record.
    pub placed: PlacedMove,
    /// Sequences completed by this move (may repeat a line, see detector).
    pub sequences: Vec<Sequence>,
    /// Whether the turn passed to the opponent.
    pub turn_passed: bool,
    /// Game status after the move.
    pub status: GameStatus,
}

impl MoveReport {
    /// Number of points this move earned.
    pub fn points(&self) -> usize {
        self.sequences.len()
    }
}
