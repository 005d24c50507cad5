//! Strictly SOS - the SOS board game with pluggable players
//!
//! Two players take turns writing `S` or `O` on an N×N board and score by
//! completing S-O-S lines. The game rules live in [`strictly_sos_rules`];
//! this crate adds the players and the plumbing around a game.
//!
//! # Architecture
//!
//! - **Players**: [`MoveSource`] implementations for typed input, a local
//!   heuristic and LLM opponents (OpenAI, Anthropic, Gemini)
//! - **Session**: [`GameSession`] runs one game at a time between two sources
//! - **Recording**: [`GameRecorder`] logs games to JSON, [`Replayer`] plays
//!   them back and checks the result
//! - **Terminal**: text front end used by the `strictly_sos` binary
//!
//! # Example
//!
//! ```no_run
//! use strictly_sos::{GameSession, HeuristicSource, HumanSource, RuleVariant};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut session = GameSession::new(
//!     5,
//!     RuleVariant::MostMatchesWins,
//!     Box::new(HumanSource::new("Alice")),
//!     Box::new(HeuristicSource::new("Computer")),
//!     true,
//! )?;
//! session.play_until_input().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod llm_client;
mod players;
mod recording;
mod session;
mod terminal;

// Crate-level exports - Player configuration
pub use config::{ConfigError, LlmPlayerConfig};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Move sources
pub use players::{
    CompletionBackend, HeuristicSource, HumanSource, LlmSource, MoveSource, MoveSourceError,
    SourceKind, build_source, parse_move,
};

// Crate-level exports - Recording and replay
pub use recording::{
    DEFAULT_RECORDINGS_DIR, FinalState, GameRecorder, REQUIRED_KEYS, Recording, RecordingError,
    RecordingErrorKind, Replayer, replay,
};

// Crate-level exports - Session
pub use session::{GameSession, SessionError, Turn};

// Crate-level exports - Terminal front end
pub use terminal::{PlayOptions, run_play, run_replay};

// Crate-level exports - Game rules
pub use strictly_sos_rules::{
    Board, Cell, Coord, GameError, GameState, GameStatus, IllegalMoveReason, Letter,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE, Move, MoveReport, PlacedMove, Player, RuleVariant, Sequence,
};
