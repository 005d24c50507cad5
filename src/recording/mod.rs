//! Game recordings: the persisted, replayable log of a finished game.
//!
//! On disk a recording is a JSON object:
//!
//! ```json
//! {
//!   "board_size": 3,
//!   "game_mode": "Simple",
//!   "blue_player_type": "human",
//!   "red_player_type": "computer",
//!   "moves": [{"row": 0, "col": 0, "letter": "S", "player": "blue"}],
//!   "final_state": {"winner": null, "blue_score": 0, "red_score": 0}
//! }
//! ```

mod error;
mod recorder;
mod replayer;

pub use error::{RecordingError, RecordingErrorKind};
pub use recorder::GameRecorder;
pub use replayer::{Replayer, replay};

use crate::players::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_sos_rules::{PlacedMove, Player, RuleVariant};
use tracing::{debug, info, instrument};

/// Default directory for saved recordings.
pub const DEFAULT_RECORDINGS_DIR: &str = "recordings";

/// Top-level keys every recording file must carry.
pub const REQUIRED_KEYS: [&str; 6] = [
    "board_size",
    "game_mode",
    "blue_player_type",
    "red_player_type",
    "moves",
    "final_state",
];

/// Terminal snapshot of a recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalState {
    /// Winner, or `None` for a draw.
    pub winner: Option<Player>,
    /// Blue's final score.
    pub blue_score: u32,
    /// Red's final score.
    pub red_score: u32,
}

/// A complete recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    board_size: usize,
    game_mode: RuleVariant,
    blue_player_type: SourceKind,
    red_player_type: SourceKind,
    moves: Vec<PlacedMove>,
    final_state: FinalState,
}

impl Recording {
    /// Assembles a recording.
    pub fn new(
        board_size: usize,
        game_mode: RuleVariant,
        blue_player_type: SourceKind,
        red_player_type: SourceKind,
        moves: Vec<PlacedMove>,
        final_state: FinalState,
    ) -> Self {
        Self {
            board_size,
            game_mode,
            blue_player_type,
            red_player_type,
            moves,
            final_state,
        }
    }

    /// Board size the game was played on.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Rule variant the game was played under.
    pub fn game_mode(&self) -> RuleVariant {
        self.game_mode
    }

    /// Kind of move source that played `player`.
    pub fn player_type(&self, player: Player) -> SourceKind {
        match player {
            Player::Blue => self.blue_player_type,
            Player::Red => self.red_player_type,
        }
    }

    /// Accepted moves in play order.
    pub fn moves(&self) -> &[PlacedMove] {
        &self.moves
    }

    /// Final winner and scores.
    pub fn final_state(&self) -> &FinalState {
        &self.final_state
    }

    /// Parses a recording, checking for every required key first.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Corrupt`] for malformed JSON, a
    /// missing top-level key, or a field of the wrong shape.
    #[instrument(skip(content), fields(len = content.len()))]
    pub fn from_json(content: &str) -> Result<Self, RecordingError> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            RecordingError::new(RecordingErrorKind::Corrupt(format!("not valid JSON: {}", e)))
        })?;

        let object = value.as_object().ok_or_else(|| {
            RecordingError::new(RecordingErrorKind::Corrupt(
                "expected a JSON object".to_string(),
            ))
        })?;
        if let Some(key) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(RecordingError::new(RecordingErrorKind::Corrupt(format!(
                "missing '{}'",
                key
            ))));
        }

        serde_json::from_value(value)
            .map_err(|e| RecordingError::new(RecordingErrorKind::Corrupt(e.to_string())))
    }

    /// Serializes as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Io`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RecordingError::new(RecordingErrorKind::Io(e.to_string())))
    }

    /// Loads a recording from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::NotFound`] for a missing file,
    /// [`RecordingErrorKind::Io`] if it cannot be read, and
    /// [`RecordingErrorKind::Corrupt`] if it is not a valid recording.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecordingError::new(RecordingErrorKind::NotFound(
                path.display().to_string(),
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let recording = Self::from_json(&content)?;
        info!(
            moves = recording.moves.len(),
            mode = %recording.game_mode,
            "Loaded recording"
        );
        Ok(recording)
    }

    /// Writes the recording to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Io`] if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), RecordingError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        debug!("Recording written");
        Ok(())
    }

    /// Saves into `dir` as `game_<mode>_<timestamp>.json`, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Io`] if the directory or file cannot be written.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, RecordingError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("game_{}_{}.json", self.game_mode, timestamp));
        self.save_to(&path)?;
        info!(path = %path.display(), "Saved recording");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_sos_rules::Letter;

    fn sample() -> Recording {
        Recording::new(
            3,
            RuleVariant::FirstMatchWins,
            SourceKind::Human,
            SourceKind::Computer,
            vec![PlacedMove::new(1, 1, Letter::O, Player::Blue)],
            FinalState {
                winner: None,
                blue_score: 0,
                red_score: 0,
            },
        )
    }

    #[test]
    fn test_json_field_names() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        for key in REQUIRED_KEYS {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["game_mode"], "Simple");
        assert_eq!(value["blue_player_type"], "human");
        assert_eq!(value["final_state"]["winner"], serde_json::Value::Null);
    }

    #[test]
    fn test_each_missing_key_is_corrupt() {
        let full: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        for key in REQUIRED_KEYS {
            let mut partial = full.clone();
            partial.as_object_mut().unwrap().remove(key);
            let err = Recording::from_json(&partial.to_string()).unwrap_err();
            assert_eq!(
                err.kind,
                RecordingErrorKind::Corrupt(format!("missing '{}'", key))
            );
        }
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let err = Recording::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err.kind, RecordingErrorKind::Corrupt(_)));

        let err = Recording::from_json("{not json").unwrap_err();
        assert!(matches!(err.kind, RecordingErrorKind::Corrupt(_)));
    }

    #[test]
    fn test_bad_letter_is_corrupt() {
        let text = sample().to_json().unwrap().replace("\"O\"", "\"X\"");
        let err = Recording::from_json(&text).unwrap_err();
        assert!(matches!(err.kind, RecordingErrorKind::Corrupt(_)));
    }
}
