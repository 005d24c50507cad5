//! Turn and termination policy for each rule variant.
//!
//! These are pure functions of the facts a move produced, separated from
//! board storage so each variant can be tested on its own.

use super::types::{GameStatus, Player, RuleVariant};
use tracing::instrument;

/// Facts about a move that has just been committed and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFacts {
    /// Player who made the move.
    pub mover: Player,
    /// Sequences the move completed.
    pub found: usize,
    /// Whether the board is now full.
    pub board_full: bool,
    /// Blue's score after crediting this move.
    pub blue_score: u32,
    /// Red's score after crediting this move.
    pub red_score: u32,
}

/// What the variant decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Whether the turn passes to the opponent.
    pub pass_turn: bool,
    /// Status after the move.
    pub status: GameStatus,
}

impl RuleVariant {
    /// Applies this variant's policy to a committed move.
    #[instrument]
    pub fn settle(self, facts: MoveFacts) -> Settlement {
        match self {
            RuleVariant::FirstMatchWins => first_match_wins(facts),
            RuleVariant::MostMatchesWins => most_matches_wins(facts),
        }
    }

    /// One-line description of the variant's goal.
    pub fn describe(self) -> &'static str {
        match self {
            RuleVariant::FirstMatchWins => "Simple mode: first player to make an SOS wins immediately",
            RuleVariant::MostMatchesWins => "General mode: make the most SOS sequences by the time the board is full",
        }
    }
}

/// First completed sequence ends the game; a full board without one is a draw.
fn first_match_wins(facts: MoveFacts) -> Settlement {
    if facts.found > 0 {
        Settlement {
            pass_turn: false,
            status: GameStatus::Won(facts.mover),
        }
    } else if facts.board_full {
        Settlement {
            pass_turn: false,
            status: GameStatus::Draw,
        }
    } else {
        Settlement {
            pass_turn: true,
            status: GameStatus::InProgress,
        }
    }
}

/// Scoring keeps the turn; the game ends when the board fills up.
fn most_matches_wins(facts: MoveFacts) -> Settlement {
    let pass_turn = facts.found == 0;
    let status = if !facts.board_full {
        GameStatus::InProgress
    } else if facts.blue_score > facts.red_score {
        GameStatus::Won(Player::Blue)
    } else if facts.red_score > facts.blue_score {
        GameStatus::Won(Player::Red)
    } else {
        GameStatus::Draw
    };
    Settlement { pass_turn, status }
}
