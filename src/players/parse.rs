//! Text form of a move: `row,col,letter`.

use regex::Regex;
use std::sync::LazyLock;
use strictly_sos_rules::{Letter, Move};

static MOVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*,\s*(\d+)\s*,\s*([SOso])").unwrap());

/// Finds the first usable `row,col,letter` triple in free text.
///
/// Whitespace around the commas and the letter's case are ignored, so
/// `"I'll play 2, 3, o."` yields `(2, 3, O)`. A triple whose numbers do
/// not fit is skipped in favour of a later one.
pub fn parse_move(text: &str) -> Option<Move> {
    MOVE_PATTERN.captures_iter(text).find_map(|caps| {
        let row = caps.get(1)?.as_str().parse().ok()?;
        let col = caps.get(2)?.as_str().parse().ok()?;
        let letter: Letter = caps.get(3)?.as_str().parse().ok()?;
        Some(Move::new(row, col, letter))
    })
}
