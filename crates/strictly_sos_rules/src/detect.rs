//! S-O-S sequence detection around a single cell.
//!
//! Only the cell that just changed can complete new sequences, so the
//! scan looks outward from that cell in the eight compass directions.
//! Each direction is checked on its own; an `O` dropped between two `S`
//! letters is found from both sides of the line and reported twice.

use super::action::Sequence;
use super::board::Board;
use super::types::{Coord, Letter};
use tracing::instrument;

/// Scan order: N, S, E, W, NE, NW, SE, SW as `(row, col)` steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

/// Sequences passing through `coord`, using whatever letter is there.
///
/// Returns an empty list for an empty or off-board cell.
#[instrument(skip(board), fields(size = board.size()))]
pub fn detect_sequences(board: &Board, coord: Coord) -> Vec<Sequence> {
    match board.letter_at(coord) {
        Some(letter) => scan(board, coord, letter),
        None => Vec::new(),
    }
}

/// Sequences that writing `letter` at `coord` would complete.
///
/// The board is read as if the cell already held `letter`; nothing is
/// written, so probing can never disturb committed state.
#[instrument(skip(board), fields(size = board.size()))]
pub fn sequences_if_placed(board: &Board, coord: Coord, letter: Letter) -> Vec<Sequence> {
    if !board.contains(coord.row, coord.col) {
        return Vec::new();
    }
    scan(board, coord, letter)
}

fn scan(board: &Board, anchor: Coord, letter: Letter) -> Vec<Sequence> {
    let size = board.size();
    let at = |c: Coord| {
        if c == anchor {
            Some(letter)
        } else {
            board.letter_at(c)
        }
    };

    let mut found = Vec::new();
    for dir in DIRECTIONS {
        let candidate = match letter {
            // Anchor is the first S.
            Letter::S => anchor.step(dir, 1, size).zip(anchor.step(dir, 2, size)).and_then(
                |(mid, end)| {
                    (at(mid) == Some(Letter::O) && at(end) == Some(Letter::S))
                        .then_some(Sequence([anchor, mid, end]))
                },
            ),
            // Anchor is the middle O.
            Letter::O => anchor
                .step(dir, -1, size)
                .zip(anchor.step(dir, 1, size))
                .and_then(|(before, after)| {
                    (at(before) == Some(Letter::S) && at(after) == Some(Letter::S))
                        .then_some(Sequence([before, anchor, after]))
                }),
        };
        found.extend(candidate);
    }
    found
}
