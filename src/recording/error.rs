//! Recording error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while recording, loading or replaying a game.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RecordingErrorKind {
    /// The recording file does not exist.
    #[display("Recording file not found: {}", _0)]
    NotFound(String),

    /// The file exists but is not a valid recording.
    #[display("Invalid recording file: {}", _0)]
    Corrupt(String),

    /// Reading or writing failed.
    #[display("I/O failure: {}", _0)]
    Io(String),

    /// No recording is open.
    #[display("No recording in progress")]
    NotRecording,

    /// The final state was already written for this recording.
    #[display("Final state already recorded")]
    FinalStateAlreadySet,

    /// The recording was finished before its final state was written.
    #[display("Final state was never recorded")]
    FinalStateMissing,

    /// Replaying the log did not reproduce the recorded game.
    #[display("Replay diverged at move {index}: {reason}")]
    Divergence {
        /// Index of the offending move (or the move count for end-of-game checks).
        index: usize,
        /// What did not match.
        reason: String,
    },
}

/// Recording error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Recording error: {} at {}:{}", kind, file, line)]
pub struct RecordingError {
    /// Error kind.
    pub kind: RecordingErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RecordingError {
    /// Creates a new recording error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: RecordingErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &RecordingErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for RecordingError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(RecordingErrorKind::Io(err.to_string()))
    }
}
