//! Local heuristic opponent.

use super::{MoveSource, MoveSourceError, SourceKind};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use strictly_sos_rules::{Coord, GameState, Letter, Move};
use tracing::{debug, instrument};

/// Takes any scoring placement it can see, otherwise plays at random.
#[derive(Debug, Clone)]
pub struct HeuristicSource {
    name: String,
    rng: StdRng,
    think_time: Duration,
}

impl HeuristicSource {
    /// Creates a heuristic source seeded from the OS.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
            think_time: Duration::ZERO,
        }
    }

    /// Creates a heuristic source whose random choices are reproducible.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
            think_time: Duration::ZERO,
        }
    }

    /// Pauses this long before answering, so a watcher can follow the game.
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    /// First placement, in row-major order trying `S` before `O`, that
    /// would complete a sequence.
    #[instrument(skip(game))]
    pub fn find_scoring_move(game: &GameState) -> Option<Move> {
        game.board().empty_cells().find_map(|Coord { row, col }| {
            Letter::ALL
                .into_iter()
                .find(|&letter| matches!(game.would_complete(row, col, letter), Ok(n) if n > 0))
                .map(|letter| Move::new(row, col, letter))
        })
    }

    fn random_move(&mut self, game: &GameState) -> Option<Move> {
        let empty: Vec<Coord> = game.board().empty_cells().collect();
        let coord = *empty.choose(&mut self.rng)?;
        let letter = if self.rng.random_bool(0.5) {
            Letter::S
        } else {
            Letter::O
        };
        Some(Move::new(coord.row, coord.col, letter))
    }
}

#[async_trait::async_trait]
impl MoveSource for HeuristicSource {
    async fn get_move(&mut self, game: &GameState) -> Result<Option<Move>, MoveSourceError> {
        if game.is_over() {
            return Err(MoveSourceError::GameOver);
        }
        if !self.think_time.is_zero() {
            tokio::time::sleep(self.think_time).await;
        }

        if let Some(mv) = Self::find_scoring_move(game) {
            debug!(ai = %self.name, %mv, "Found scoring move");
            return Ok(Some(mv));
        }

        let mv = self
            .random_move(game)
            .ok_or(MoveSourceError::NoMovesAvailable)?;
        debug!(ai = %self.name, %mv, "No scoring move, playing at random");
        Ok(Some(mv))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Computer
    }
}
