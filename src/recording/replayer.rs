//! Step-by-step replay of recorded games.

use super::{FinalState, Recording, RecordingError, RecordingErrorKind};
use std::path::Path;
use strictly_sos_rules::{GameState, MoveReport, PlacedMove};
use tracing::{debug, info, instrument};

/// Hands out the moves of a [`Recording`] one at a time, in original order.
#[derive(Debug, Clone)]
pub struct Replayer {
    recording: Recording,
    index: usize,
}

impl Replayer {
    /// Creates a replayer positioned before the first move.
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            index: 0,
        }
    }

    /// Loads a recording file and positions before the first move.
    ///
    /// # Errors
    ///
    /// See [`Recording::load`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        Ok(Self::new(Recording::load(path)?))
    }

    /// The recording being replayed.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Recorded final state.
    pub fn final_state(&self) -> &FinalState {
        self.recording.final_state()
    }

    /// Returns true while moves remain.
    pub fn has_next(&self) -> bool {
        self.index < self.recording.moves().len()
    }

    /// Index of the next move to hand out.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Total number of recorded moves.
    pub fn total(&self) -> usize {
        self.recording.moves().len()
    }

    /// Returns the next move and advances, or `None` at the end.
    pub fn next_move(&mut self) -> Option<PlacedMove> {
        let mv = self.recording.moves().get(self.index).copied()?;
        self.index += 1;
        Some(mv)
    }

    /// Rewinds to the first move.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Fresh game configured like the recorded one.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Corrupt`] if the recorded board size
    /// is not playable.
    pub fn new_game(&self) -> Result<GameState, RecordingError> {
        GameState::new(self.recording.board_size(), self.recording.game_mode())
            .map_err(|e| RecordingError::new(RecordingErrorKind::Corrupt(e.to_string())))
    }

    /// Feeds the next recorded move into `game`.
    ///
    /// The recorded player must hold the turn in `game`; the replay does not
    /// advance past a move that fails to apply.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Divergence`] if the move is refused or
    /// attributed to the wrong player.
    #[instrument(skip(self, game), fields(index = self.index, total = self.total()))]
    pub fn apply_next(&mut self, game: &mut GameState) -> Result<Option<MoveReport>, RecordingError> {
        let Some(mv) = self.recording.moves().get(self.index).copied() else {
            return Ok(None);
        };

        if game.current_player() != mv.player {
            return Err(self.divergence(format!(
                "recorded mover is {} but {} holds the turn",
                mv.player,
                game.current_player()
            )));
        }

        let report = game
            .apply_move(mv.row, mv.col, mv.letter)
            .map_err(|e| self.divergence(e.to_string()))?;
        debug!(%mv, points = report.points(), "Replayed move");
        self.index += 1;
        Ok(Some(report))
    }

    /// Checks that `game` ended the way the recording says it did.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingErrorKind::Divergence`] if the game is unfinished
    /// or the winner or either score differs.
    pub fn verify_final(&self, game: &GameState) -> Result<(), RecordingError> {
        let expected = self.recording.final_state();
        let index = self.total();
        if !game.is_over() {
            return Err(RecordingError::new(RecordingErrorKind::Divergence {
                index,
                reason: "game still in progress after the last recorded move".to_string(),
            }));
        }

        let actual = FinalState {
            winner: game.winner(),
            blue_score: game.blue_score(),
            red_score: game.red_score(),
        };
        if actual != *expected {
            return Err(RecordingError::new(RecordingErrorKind::Divergence {
                index,
                reason: format!("recorded {:?}, replay produced {:?}", expected, actual),
            }));
        }
        Ok(())
    }

    #[track_caller]
    fn divergence(&self, reason: String) -> RecordingError {
        RecordingError::new(RecordingErrorKind::Divergence {
            index: self.index,
            reason,
        })
    }
}

/// Replays a whole recording against a fresh game and verifies the outcome.
///
/// # Errors
///
/// Returns [`RecordingErrorKind::Corrupt`] for an unplayable configuration
/// and [`RecordingErrorKind::Divergence`] if the replay does not reproduce
/// the recorded game.
#[instrument(skip(recording), fields(moves = recording.moves().len(), mode = %recording.game_mode()))]
pub fn replay(recording: &Recording) -> Result<GameState, RecordingError> {
    let mut replayer = Replayer::new(recording.clone());
    let mut game = replayer.new_game()?;
    while replayer.apply_next(&mut game)?.is_some() {}
    replayer.verify_final(&game)?;
    info!(status = %game.status(), "Replay matched recording");
    Ok(game)
}
