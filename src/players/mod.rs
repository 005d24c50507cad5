//! Move sources: where each player's moves come from.

mod heuristic;
mod human;
mod llm;
mod parse;

pub use heuristic::HeuristicSource;
pub use human::HumanSource;
pub use llm::{CompletionBackend, LlmSource};
pub use parse::parse_move;

use crate::config::{ConfigError, LlmPlayerConfig};
use crate::llm_client::LlmClient;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strictly_sos_rules::{GameState, Move};
use tracing::{info, instrument};

/// Kind of move source, as written into recordings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceKind {
    /// Moves typed by a person.
    Human,
    /// Local heuristic.
    Computer,
    /// Remote language model.
    Llm,
}

/// Failure to produce a move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveSourceError {
    /// No valid move within the source's attempt budget.
    #[display("{source_name} gave up after {attempts} attempts: {last_error}")]
    Exhausted {
        /// Name of the source.
        source_name: String,
        /// Attempts made.
        attempts: u32,
        /// Why the last attempt failed.
        last_error: String,
    },

    /// The board has no empty cells.
    #[display("No empty cells left to play")]
    NoMovesAvailable,

    /// Asked for a move after the game ended.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveSourceError {}

/// Something that can be asked for a move.
///
/// Sources only read the game through its public accessors; they never
/// change it. The session validates and applies whatever they return.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Proposes a move for the player whose turn it is.
    ///
    /// `Ok(None)` means the move will arrive some other way (typed input)
    /// and the caller should apply it directly.
    async fn get_move(&mut self, game: &GameState) -> Result<Option<Move>, MoveSourceError>;

    /// Returns the source's display name.
    fn name(&self) -> &str;

    /// Kind of source, for recordings.
    fn kind(&self) -> SourceKind;
}

/// Builds a move source of the given kind.
///
/// `llm` settings are used only for [`SourceKind::Llm`]; defaults apply when
/// absent. `seed` makes the heuristic source deterministic and `think_time`
/// slows it down for watching.
///
/// # Errors
///
/// Returns [`ConfigError`] if an LLM source cannot find its API key.
#[instrument(skip(llm))]
pub fn build_source(
    kind: SourceKind,
    name: &str,
    llm: Option<&LlmPlayerConfig>,
    seed: Option<u64>,
    think_time: Duration,
) -> Result<Box<dyn MoveSource>, ConfigError> {
    info!(%kind, name, "Building move source");
    let source: Box<dyn MoveSource> = match kind {
        SourceKind::Human => Box::new(HumanSource::new(name)),
        SourceKind::Computer => {
            let source = match seed {
                Some(seed) => HeuristicSource::with_seed(name, seed),
                None => HeuristicSource::new(name),
            };
            Box::new(source.with_think_time(think_time))
        }
        SourceKind::Llm => {
            let settings = llm.cloned().unwrap_or_default();
            let client = LlmClient::new(settings.create_llm_config()?);
            Box::new(LlmSource::new(name, client, *settings.max_attempts()))
        }
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::Computer.to_string(), "computer");
        assert_eq!("LLM".parse::<SourceKind>().unwrap(), SourceKind::Llm);
        assert_eq!(serde_json::to_string(&SourceKind::Human).unwrap(), "\"human\"");
    }

    #[test]
    fn test_build_local_sources() {
        let human = build_source(SourceKind::Human, "Alice", None, None, Duration::ZERO).unwrap();
        assert_eq!(human.kind(), SourceKind::Human);
        assert_eq!(human.name(), "Alice");

        let ai = build_source(SourceKind::Computer, "Bot", None, Some(3), Duration::ZERO).unwrap();
        assert_eq!(ai.kind(), SourceKind::Computer);
    }
}
