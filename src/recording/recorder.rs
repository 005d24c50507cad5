//! Recording of games as they are played.

use super::{FinalState, Recording, RecordingError, RecordingErrorKind};
use crate::players::SourceKind;
use std::path::{Path, PathBuf};
use strictly_sos_rules::{Letter, PlacedMove, Player, RuleVariant};
use tracing::{debug, info, instrument, warn};

/// Recording in progress.
#[derive(Debug, Clone)]
struct Draft {
    board_size: usize,
    game_mode: RuleVariant,
    blue_player_type: SourceKind,
    red_player_type: SourceKind,
    moves: Vec<PlacedMove>,
    final_state: Option<FinalState>,
}

/// Collects moves for one game and freezes them into a [`Recording`].
///
/// Moves are appended verbatim; the caller records only moves the engine
/// accepted.
#[derive(Debug, Clone, Default)]
pub struct GameRecorder {
    draft: Option<Draft>,
}

impl GameRecorder {
    /// Creates an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a recording is open.
    pub fn is_recording(&self) -> bool {
        self.draft.is_some()
    }

    /// Number of moves recorded so far.
    pub fn move_count(&self) -> usize {
        self.draft.as_ref().map_or(0, |d| d.moves.len())
    }

    /// Opens a fresh recording, discarding any recording already open.
    #[instrument(skip(self))]
    pub fn start_recording(
        &mut self,
        board_size: usize,
        game_mode: RuleVariant,
        blue_player_type: SourceKind,
        red_player_type: SourceKind,
    ) {
        if let Some(old) = &self.draft {
            warn!(moves = old.moves.len(), "Replacing unfinished recording");
        }
        info!("Recording started");
        self.draft = Some(Draft {
            board_size,
            game_mode,
            blue_player_type,
            red_player_type,
            moves: Vec::new(),
            final_state: None,
        });
    }

    /// Appends a move.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::NotRecording`] if no recording is open.
    #[instrument(skip(self))]
    pub fn record_move(
        &mut self,
        row: usize,
        col: usize,
        letter: Letter,
        player: Player,
    ) -> Result<(), RecordingError> {
        let draft = self.draft_mut()?;
        draft.moves.push(PlacedMove::new(row, col, letter, player));
        debug!(moves = draft.moves.len(), "Move recorded");
        Ok(())
    }

    /// Writes the terminal snapshot. Allowed once per recording.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::NotRecording`] if no recording is open
    /// and [`RecordingErrorKind::FinalStateAlreadySet`] on a second call.
    #[instrument(skip(self))]
    pub fn record_final_state(
        &mut self,
        winner: Option<Player>,
        blue_score: u32,
        red_score: u32,
    ) -> Result<(), RecordingError> {
        let draft = self.draft_mut()?;
        if draft.final_state.is_some() {
            return Err(RecordingError::new(RecordingErrorKind::FinalStateAlreadySet));
        }
        draft.final_state = Some(FinalState {
            winner,
            blue_score,
            red_score,
        });
        Ok(())
    }

    /// Closes the recording and returns it. Later record calls are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::NotRecording`] if nothing is open and
    /// [`RecordingErrorKind::FinalStateMissing`] if the game end was never
    /// recorded (the draft is kept so it can still be completed).
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> Result<Recording, RecordingError> {
        let final_state = self
            .draft
            .as_ref()
            .ok_or_else(|| RecordingError::new(RecordingErrorKind::NotRecording))?
            .final_state
            .ok_or_else(|| RecordingError::new(RecordingErrorKind::FinalStateMissing))?;

        let draft = self
            .draft
            .take()
            .ok_or_else(|| RecordingError::new(RecordingErrorKind::NotRecording))?;
        info!(moves = draft.moves.len(), "Recording finished");
        Ok(Recording::new(
            draft.board_size,
            draft.game_mode,
            draft.blue_player_type,
            draft.red_player_type,
            draft.moves,
            final_state,
        ))
    }

    /// Drops the open recording without saving.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            info!("Recording cancelled");
        }
    }

    /// Finishes the recording and saves it into `dir`.
    ///
    /// # Errors
    ///
    /// Propagates [`GameRecorder::finish`] and [`Recording::save_in`] errors.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn save_recording(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, RecordingError> {
        self.finish()?.save_in(dir)
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, RecordingError> {
        self.draft
            .as_mut()
            .ok_or_else(|| RecordingError::new(RecordingErrorKind::NotRecording))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GameRecorder {
        let mut recorder = GameRecorder::new();
        recorder.start_recording(
            4,
            RuleVariant::MostMatchesWins,
            SourceKind::Computer,
            SourceKind::Llm,
        );
        recorder
    }

    #[test]
    fn test_record_before_start_rejected() {
        let mut recorder = GameRecorder::new();
        let err = recorder.record_move(0, 0, Letter::S, Player::Blue).unwrap_err();
        assert_eq!(err.kind, RecordingErrorKind::NotRecording);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_moves_kept_verbatim_and_in_order() {
        let mut recorder = started();
        recorder.record_move(3, 3, Letter::O, Player::Red).unwrap();
        recorder.record_move(0, 1, Letter::S, Player::Red).unwrap();
        recorder.record_final_state(Some(Player::Red), 0, 2).unwrap();

        let recording = recorder.finish().unwrap();
        assert_eq!(
            recording.moves(),
            &[
                PlacedMove::new(3, 3, Letter::O, Player::Red),
                PlacedMove::new(0, 1, Letter::S, Player::Red),
            ]
        );
        assert_eq!(recording.board_size(), 4);
        assert_eq!(recording.player_type(Player::Red), SourceKind::Llm);
        assert_eq!(recording.final_state().red_score, 2);
    }

    #[test]
    fn test_final_state_only_once() {
        let mut recorder = started();
        recorder.record_final_state(None, 1, 1).unwrap();
        let err = recorder.record_final_state(Some(Player::Blue), 2, 1).unwrap_err();
        assert_eq!(err.kind, RecordingErrorKind::FinalStateAlreadySet);
        assert_eq!(recorder.finish().unwrap().final_state().winner, None);
    }

    #[test]
    fn test_finish_without_final_state_keeps_draft() {
        let mut recorder = started();
        recorder.record_move(1, 1, Letter::O, Player::Blue).unwrap();
        let err = recorder.finish().unwrap_err();
        assert_eq!(err.kind, RecordingErrorKind::FinalStateMissing);
        assert!(recorder.is_recording());
        assert_eq!(recorder.move_count(), 1);
    }

    #[test]
    fn test_calls_after_finish_rejected() {
        let mut recorder = started();
        recorder.record_final_state(None, 0, 0).unwrap();
        recorder.finish().unwrap();

        assert!(recorder.record_move(0, 0, Letter::S, Player::Blue).is_err());
        assert!(recorder.record_final_state(None, 0, 0).is_err());
        assert_eq!(recorder.finish().unwrap_err().kind, RecordingErrorKind::NotRecording);
    }

    #[test]
    fn test_restart_replaces_open_recording() {
        let mut recorder = started();
        recorder.record_move(0, 0, Letter::S, Player::Blue).unwrap();
        recorder.start_recording(3, RuleVariant::FirstMatchWins, SourceKind::Human, SourceKind::Human);
        assert_eq!(recorder.move_count(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut recorder = started();
        recorder.cancel();
        assert!(!recorder.is_recording());
        recorder.cancel();
    }
}
