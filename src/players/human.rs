//! Human player whose moves arrive as typed input.

use super::{MoveSource, MoveSourceError, SourceKind};
use strictly_sos_rules::{GameState, Move};
use tracing::debug;

/// Relay for a person at the keyboard.
///
/// Never proposes anything itself: the caller collects the input and
/// applies it straight to the session.
#[derive(Debug, Clone)]
pub struct HumanSource {
    name: String,
}

impl HumanSource {
    /// Creates a new human source.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveSource for HumanSource {
    async fn get_move(&mut self, game: &GameState) -> Result<Option<Move>, MoveSourceError> {
        debug!(human = %self.name, player = %game.current_player(), "Waiting for typed move");
        Ok(None)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Human
    }
}
