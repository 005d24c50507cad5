//! First-class invariants for SOS.
//!
//! Invariants are logical properties that must hold throughout game
//! execution. The engine checks them after every accepted move in debug
//! builds, and they can be tested independently.

use super::game::GameState;
use super::types::Player;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: history length equals the number of written cells.
///
/// Every move in history corresponds to exactly one letter on the board.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        game.history().len() == game.board().occupied_count()
    }

    fn description() -> &'static str {
        "History length matches number of written cells"
    }
}

/// Invariant: each score equals the number of sequences credited to that player.
pub struct ScoreConsistentInvariant;

impl Invariant<GameState> for ScoreConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let owned = |player: Player| {
            game.completed_sequences()
                .iter()
                .filter(|c| c.owner == player)
                .count() as u32
        };
        owned(Player::Blue) == game.blue_score() && owned(Player::Red) == game.red_score()
    }

    fn description() -> &'static str {
        "Scores match completed sequences per owner"
    }
}

/// Every invariant the engine maintains.
pub type GameInvariants = (HistoryConsistentInvariant, ScoreConsistentInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Letter, RuleVariant};

    #[test]
    fn test_fresh_game_holds() {
        let game = GameState::new(3, RuleVariant::MostMatchesWins).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_holds_through_scoring_moves() {
        let mut game = GameState::new(4, RuleVariant::MostMatchesWins).unwrap();
        for (row, col, letter) in [
            (0, 0, Letter::S),
            (0, 2, Letter::S),
            (0, 1, Letter::O),
            (1, 1, Letter::O),
            (2, 2, Letter::S),
        ] {
            game.apply_move(row, col, letter).unwrap();
            assert!(HistoryConsistentInvariant::holds(&game));
            assert!(ScoreConsistentInvariant::holds(&game));
        }
        assert_eq!(game.blue_score() + game.red_score(), 3);
    }

    #[test]
    fn test_violation_descriptions() {
        let violation = InvariantViolation::new(HistoryConsistentInvariant::description());
        assert_eq!(
            violation.description,
            "History length matches number of written cells"
        );
    }
}
