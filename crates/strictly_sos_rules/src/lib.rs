//! Pure SOS game logic.
//!
//! Two players take turns writing `S` or `O` into an N×N grid. Writing the
//! last letter of a straight S-O-S line (horizontal, vertical or diagonal)
//! scores. Under [`RuleVariant::FirstMatchWins`] the first score wins the
//! game; under [`RuleVariant::MostMatchesWins`] a scoring player moves
//! again and the highest score wins once the board is full.
//!
//! # Example
//!
//! ```
//! use strictly_sos_rules::{GameState, Letter, Player, RuleVariant};
//!
//! let mut game = GameState::new(3, RuleVariant::FirstMatchWins)?;
//! game.apply_move(0, 0, Letter::S)?;
//! game.apply_move(1, 1, Letter::S)?;
//! game.apply_move(0, 1, Letter::O)?;
//! let report = game.apply_move(0, 2, Letter::S)?;
//! assert_eq!(report.points(), 1);
//! assert_eq!(game.winner(), Some(Player::Red));
//! # Ok::<(), strictly_sos_rules::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod detect;
mod error;
mod game;
mod invariants;
mod rules;
mod types;

pub use action::{CompletedSequence, Move, MoveReport, PlacedMove, Sequence};
pub use board::Board;
pub use detect::{DIRECTIONS, detect_sequences, sequences_if_placed};
pub use error::{GameError, IllegalMoveReason, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use game::GameState;
pub use invariants::{
    GameInvariants, HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation,
    ScoreConsistentInvariant,
};
pub use rules::{MoveFacts, Settlement};
pub use types::{Cell, Coord, GameStatus, Letter, Player, RuleVariant};
