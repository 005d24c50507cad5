//! Engine error types.

use derive_more::Display;

/// Smallest board the game can be played on.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest board the game can be played on.
pub const MAX_BOARD_SIZE: usize = 64;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMoveReason {
    /// The cell already holds a letter.
    #[display("cell is already occupied")]
    CellOccupied,
    /// The game has ended.
    #[display("game is already over")]
    GameOver,
}

/// Errors reported by the board and the rules engine.
///
/// Move errors leave the game untouched and are always safe to retry
/// with a different move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameError {
    /// Coordinates outside the board.
    #[display("Position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board size.
        size: usize,
    },

    /// Occupied cell or finished game.
    #[display("Illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// What was wrong.
        reason: IllegalMoveReason,
    },

    /// Board size outside the playable range.
    #[display("Board size must be between 3 and 64, got {size}")]
    InvalidConfiguration {
        /// Requested size.
        size: usize,
    },
}

impl std::error::Error for GameError {}

impl GameError {
    /// Checks a requested board size and returns its cell count.
    pub fn check_size(size: usize) -> Result<usize, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidConfiguration { size });
        }
        size.checked_mul(size).ok_or(GameError::InvalidConfiguration { size })
    }
}
