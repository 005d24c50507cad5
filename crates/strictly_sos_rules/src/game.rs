//! SOS game engine.
//!
//! [`GameState`] owns the board and is mutated only through
//! [`GameState::apply_move`]. Validation and sequence detection are shared;
//! the turn and termination decision is delegated to the game's
//! [`RuleVariant`].

use super::action::{CompletedSequence, Move, MoveReport, PlacedMove};
use super::board::Board;
use super::detect::{detect_sequences, sequences_if_placed};
use super::error::{GameError, IllegalMoveReason};
use super::invariants::{GameInvariants, InvariantSet};
use super::rules::MoveFacts;
use super::types::{Cell, Coord, GameStatus, Letter, Player, RuleVariant};
use tracing::{debug, info, instrument};

/// Complete state of one SOS game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    variant: RuleVariant,
    current_player: Player,
    blue_score: u32,
    red_score: u32,
    status: GameStatus,
    completed: Vec<CompletedSequence>,
    history: Vec<PlacedMove>,
}

impl GameState {
    /// Creates a new game. Blue moves first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] if `size` is outside `3..=64`.
    #[instrument]
    pub fn new(size: usize, variant: RuleVariant) -> Result<Self, GameError> {
        let board = Board::new(size)?;
        info!(size, %variant, "Starting new game");
        Ok(Self {
            board,
            variant,
            current_player: Player::Blue,
            blue_score: 0,
            red_score: 0,
            status: GameStatus::InProgress,
            completed: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Rule variant in force.
    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Blue's score.
    pub fn blue_score(&self) -> u32 {
        self.blue_score
    }

    /// Red's score.
    pub fn red_score(&self) -> u32 {
        self.red_score
    }

    /// Score of `player`.
    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::Blue => self.blue_score,
            Player::Red => self.red_score,
        }
    }

    /// Game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Winner of a finished game; `None` while in progress or on a draw.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Sequences completed so far, in the order they were found.
    pub fn completed_sequences(&self) -> &[CompletedSequence] {
        &self.completed
    }

    /// Every accepted move, in apply order.
    pub fn history(&self) -> &[PlacedMove] {
        &self.history
    }

    /// Gets the cell at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] for coordinates off the board.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board.get(row, col)
    }

    /// Checks a move against the current state without applying it.
    ///
    /// # Errors
    ///
    /// Returns the error [`GameState::apply_move`] would return.
    pub fn validate(&self, row: usize, col: usize) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::IllegalMove {
                row,
                col,
                reason: IllegalMoveReason::GameOver,
            });
        }
        if !self.board.is_empty(row, col)? {
            return Err(GameError::IllegalMove {
                row,
                col,
                reason: IllegalMoveReason::CellOccupied,
            });
        }
        Ok(())
    }

    /// Number of sequences writing `letter` at (`row`, `col`) would complete.
    ///
    /// Read-only probe for scripted players; the board, history and scores
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] or [`GameError::IllegalMove`] for
    /// a placement that could not be made.
    #[instrument(skip(self))]
    pub fn would_complete(&self, row: usize, col: usize, letter: Letter) -> Result<usize, GameError> {
        self.validate(row, col)?;
        Ok(sequences_if_placed(&self.board, Coord::new(row, col), letter).len())
    }

    /// Applies a [`Move`].
    ///
    /// # Errors
    ///
    /// See [`GameState::apply_move`].
    pub fn apply(&mut self, mv: Move) -> Result<MoveReport, GameError> {
        self.apply_move(mv.row, mv.col, mv.letter)
    }

    /// Writes `letter` at (`row`, `col`) for the current player.
    ///
    /// The history entry records the player who held the turn before the
    /// move. Scoring, turn passing and game end follow the rule variant.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] or [`GameError::IllegalMove`]
    /// (occupied cell, finished game). A rejected move changes nothing.
    #[instrument(skip(self), fields(player = %self.current_player, variant = %self.variant))]
    pub fn apply_move(&mut self, row: usize, col: usize, letter: Letter) -> Result<MoveReport, GameError> {
        if let Err(e) = self.validate(row, col) {
            debug!(error = %e, "Move rejected");
            return Err(e);
        }

        let mover = self.current_player;
        self.board.place(row, col, letter)?;
        let placed = PlacedMove::new(row, col, letter, mover);
        self.history.push(placed);

        let sequences = detect_sequences(&self.board, Coord::new(row, col));
        let found = sequences.len();
        if found > 0 {
            match mover {
                Player::Blue => self.blue_score += found as u32,
                Player::Red => self.red_score += found as u32,
            }
            self.completed
                .extend(sequences.iter().map(|&sequence| CompletedSequence {
                    sequence,
                    owner: mover,
                }));
            debug!(found, blue = self.blue_score, red = self.red_score, "Sequences completed");
        }

        let settlement = self.variant.settle(MoveFacts {
            mover,
            found,
            board_full: self.board.is_full(),
            blue_score: self.blue_score,
            red_score: self.red_score,
        });
        if settlement.pass_turn {
            self.current_player = mover.opponent();
        }
        self.status = settlement.status;
        if self.is_over() {
            info!(status = %self.status, blue = self.blue_score, red = self.red_score, "Game over");
        }

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "engine invariant violated after {}",
            placed
        );

        Ok(MoveReport {
            placed,
            sequences,
            turn_passed: settlement.pass_turn,
            status: self.status,
        })
    }

    /// Starts over, optionally with a new size and variant.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] for an unplayable size; the
    /// current game is left as it was.
    #[instrument(skip(self))]
    pub fn reset(&mut self, size: Option<usize>, variant: Option<RuleVariant>) -> Result<(), GameError> {
        let size = size.unwrap_or(self.board.size());
        let variant = variant.unwrap_or(self.variant);
        *self = Self::new(size, variant)?;
        Ok(())
    }
}
