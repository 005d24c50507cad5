//! Square SOS board.

use super::error::{GameError, IllegalMoveReason};
use super::types::{Cell, Coord, Letter};
use serde::Serialize;
use tracing::instrument;

/// N×N board. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] if `size` is outside
    /// `3..=64`.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GameError> {
        let count = GameError::check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; count],
        })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if (`row`, `col`) lies on the board.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if !self.contains(row, col) {
            return Err(GameError::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    /// Gets the cell at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] for coordinates off the board.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Letter at `coord`, or `None` when empty or off the board.
    pub fn letter_at(&self, coord: Coord) -> Option<Letter> {
        self.get(coord.row, coord.col).ok().and_then(Cell::letter)
    }

    /// Checks whether (`row`, `col`) is still empty.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] for coordinates off the board.
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, GameError> {
        Ok(self.get(row, col)?.is_empty())
    }

    /// Writes `letter` into an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] or [`GameError::IllegalMove`];
    /// the board is unchanged in both cases.
    pub fn place(&mut self, row: usize, col: usize, letter: Letter) -> Result<(), GameError> {
        let idx = self.index(row, col)?;
        if !self.cells[idx].is_empty() {
            return Err(GameError::IllegalMove {
                row,
                col,
                reason: IllegalMoveReason::CellOccupied,
            });
        }
        self.cells[idx] = Cell::Filled(letter);
        Ok(())
    }

    /// True iff every cell holds a letter.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of cells holding a letter.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(idx, _)| Coord::new(idx / self.size, idx % self.size))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

/// Text grid with column header and row labels; `.` marks an empty cell.
///
/// ```text
///    0 1 2
/// 0 | S . .
/// 1 | . O .
/// 2 | . . S
/// ```
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header: Vec<String> = (0..self.size).map(|i| i.to_string()).collect();
        write!(f, "   {}", header.join(" "))?;
        for (row, cells) in self.rows().enumerate() {
            write!(f, "\n{} |", row)?;
            for cell in cells {
                let symbol = cell.letter().map(Letter::as_char).unwrap_or('.');
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.empty_cells().count(), 16);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(board.get(row, col).unwrap(), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_too_small_rejected() {
        assert_eq!(
            Board::new(2),
            Err(GameError::InvalidConfiguration { size: 2 })
        );
        assert!(Board::new(0).is_err());
    }

    #[test]
    fn test_too_large_rejected() {
        assert_eq!(
            Board::new(1usize << 33),
            Err(GameError::InvalidConfiguration { size: 1usize << 33 })
        );
        assert!(Board::new(65).is_err());
        assert_eq!(Board::new(64).unwrap().empty_cells().count(), 4096);
    }

    #[test]
    fn test_serializes_size_and_cells() {
        let mut board = Board::new(3).unwrap();
        board.place(0, 0, Letter::S).unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["size"], 3);
        assert_eq!(value["cells"].as_array().map(Vec::len), Some(9));
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new(3).unwrap();
        assert_eq!(
            board.get(3, 0),
            Err(GameError::OutOfRange {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert!(board.get(0, 3).is_err());
    }

    #[test]
    fn test_place_occupied_rejected() {
        let mut board = Board::new(3).unwrap();
        board.place(1, 1, Letter::O).unwrap();
        let err = board.place(1, 1, Letter::S).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove {
                reason: IllegalMoveReason::CellOccupied,
                ..
            }
        ));
        assert_eq!(board.get(1, 1).unwrap(), Cell::Filled(Letter::O));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(3).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert!(!board.is_full());
                board.place(row, col, Letter::O).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.empty_cells().next(), None);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(3).unwrap();
        board.place(0, 0, Letter::S).unwrap();
        board.place(0, 2, Letter::S).unwrap();
        let first: Vec<Coord> = board.empty_cells().take(2).collect();
        assert_eq!(first, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3).unwrap();
        board.place(0, 0, Letter::S).unwrap();
        board.place(1, 1, Letter::O).unwrap();
        assert_eq!(
            board.to_string(),
            "   0 1 2\n0 | S . .\n1 | . O .\n2 | . . ."
        );
    }
}
