//! Game session: one game between two move sources.

use crate::players::{MoveSource, MoveSourceError};
use crate::recording::{GameRecorder, Recording, RecordingError};
use derive_more::{Display, From};
use strictly_sos_rules::{GameError, GameState, GameStatus, Move, MoveReport, Player, RuleVariant};
use tracing::{debug, info, instrument, warn};

/// Outcome of asking the session to advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The player's move must be supplied through [`GameSession::submit_move`].
    Awaiting(Player),
    /// A source move was applied.
    Played(MoveReport),
    /// The game is over; nothing was asked.
    Finished(GameStatus),
}

/// Session failure.
#[derive(Debug, Display, From)]
pub enum SessionError {
    /// The engine rejected a move or configuration.
    #[display("{_0}")]
    Game(GameError),
    /// A source could not produce a move.
    #[display("{_0}")]
    Source(MoveSourceError),
    /// Recording bookkeeping failed.
    #[display("{_0}")]
    Recording(RecordingError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Game(e) => Some(e),
            SessionError::Source(e) => Some(e),
            SessionError::Recording(e) => Some(e),
        }
    }
}

/// Runs one game at a time between a Blue and a Red source.
///
/// Moves are applied strictly in turn. A rejected move is returned to the
/// caller and leaves the game untouched. When recording is on, every
/// accepted move is logged and the recording is closed when the game ends.
pub struct GameSession {
    game: GameState,
    blue: Box<dyn MoveSource>,
    red: Box<dyn MoveSource>,
    recorder: GameRecorder,
    record: bool,
    last_recording: Option<Recording>,
}

impl GameSession {
    /// Creates a session for a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] for a size outside `3..=64`.
    #[instrument(skip(blue, red), fields(blue = %blue.name(), red = %red.name()))]
    pub fn new(
        size: usize,
        variant: RuleVariant,
        blue: Box<dyn MoveSource>,
        red: Box<dyn MoveSource>,
        record: bool,
    ) -> Result<Self, SessionError> {
        let game = GameState::new(size, variant)?;
        let mut session = Self {
            game,
            blue,
            red,
            recorder: GameRecorder::new(),
            record,
            last_recording: None,
        };
        if record {
            session.start_recording();
        }
        info!("Session created");
        Ok(session)
    }

    /// Returns the game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns the source playing `player`.
    pub fn source(&self, player: Player) -> &dyn MoveSource {
        match player {
            Player::Blue => self.blue.as_ref(),
            Player::Red => self.red.as_ref(),
        }
    }

    /// Returns true when new games are recorded.
    pub fn is_recording(&self) -> bool {
        self.record
    }

    /// Turns recording on or off.
    ///
    /// Turning it on mid-game takes effect from the next game, since the
    /// moves already played were not logged.
    #[instrument(skip(self))]
    pub fn set_recording(&mut self, enabled: bool) {
        self.record = enabled;
        if !enabled {
            self.recorder.cancel();
        } else if !self.recorder.is_recording() && self.game.history().is_empty() {
            self.start_recording();
        }
    }

    /// Takes the recording of the most recently finished game.
    pub fn take_recording(&mut self) -> Option<Recording> {
        self.last_recording.take()
    }

    /// Asks the current player's source for a move and applies it.
    ///
    /// # Errors
    ///
    /// Returns the source's failure, or the engine's rejection of the move
    /// it proposed. Either way the game is unchanged.
    #[instrument(skip(self), fields(player = %self.game.current_player()))]
    pub async fn request_move(&mut self) -> Result<Turn, SessionError> {
        if self.game.is_over() {
            return Ok(Turn::Finished(self.game.status()));
        }

        let player = self.game.current_player();
        let source = match player {
            Player::Blue => &mut self.blue,
            Player::Red => &mut self.red,
        };
        debug!(source = %source.name(), "Requesting move");

        let proposed = source.get_move(&self.game).await?;
        match proposed {
            None => Ok(Turn::Awaiting(player)),
            Some(mv) => self.submit_move(mv).map(Turn::Played),
        }
    }

    /// Applies a move for the current player, whoever supplied it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Game`] if the engine rejects the move.
    #[instrument(skip(self), fields(player = %self.game.current_player()))]
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveReport, SessionError> {
        let report = self.game.apply(mv).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;

        if self.recorder.is_recording() {
            let placed = report.placed;
            self.recorder
                .record_move(placed.row, placed.col, placed.letter, placed.player)?;
            if report.status.is_over() {
                self.recorder.record_final_state(
                    self.game.winner(),
                    self.game.blue_score(),
                    self.game.red_score(),
                )?;
                self.last_recording = Some(self.recorder.finish()?);
            }
        }

        debug!(placed = %report.placed, points = report.points(), "Move applied");
        Ok(report)
    }

    /// Lets sources play until a typed move is needed or the game ends.
    ///
    /// # Errors
    ///
    /// See [`GameSession::request_move`].
    pub async fn play_until_input(&mut self) -> Result<Turn, SessionError> {
        loop {
            match self.request_move().await? {
                Turn::Played(_) => continue,
                turn => return Ok(turn),
            }
        }
    }

    /// Starts a new game, optionally with a new size and variant.
    ///
    /// An unfinished recording is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] for an unplayable size; the
    /// current game is kept.
    #[instrument(skip(self))]
    pub fn new_game(
        &mut self,
        size: Option<usize>,
        variant: Option<RuleVariant>,
    ) -> Result<(), SessionError> {
        self.game.reset(size, variant)?;
        self.recorder.cancel();
        if self.record {
            self.start_recording();
        }
        info!(size = self.game.size(), variant = %self.game.variant(), "New game");
        Ok(())
    }

    fn start_recording(&mut self) {
        self.recorder.start_recording(
            self.game.size(),
            self.game.variant(),
            self.blue.kind(),
            self.red.kind(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{HeuristicSource, HumanSource, SourceKind};
    use strictly_sos_rules::Letter;

    fn humans(record: bool) -> GameSession {
        GameSession::new(
            3,
            RuleVariant::FirstMatchWins,
            Box::new(HumanSource::new("Alice")),
            Box::new(HumanSource::new("Bob")),
            record,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_small_board() {
        let result = GameSession::new(
            2,
            RuleVariant::FirstMatchWins,
            Box::new(HumanSource::new("Alice")),
            Box::new(HumanSource::new("Bob")),
            false,
        );
        assert!(matches!(
            result,
            Err(SessionError::Game(GameError::InvalidConfiguration { size: 2 }))
        ));
    }

    #[tokio::test]
    async fn test_human_turn_awaits_input() {
        let mut session = humans(false);
        assert_eq!(
            session.request_move().await.unwrap(),
            Turn::Awaiting(Player::Blue)
        );
        assert!(session.game().history().is_empty());
    }

    #[test]
    fn test_rejected_move_keeps_state() {
        let mut session = humans(true);
        session.submit_move(Move::new(1, 1, Letter::S)).unwrap();
        let err = session.submit_move(Move::new(1, 1, Letter::O)).unwrap_err();
        assert!(matches!(err, SessionError::Game(GameError::IllegalMove { .. })));
        assert_eq!(session.game().history().len(), 1);
        assert_eq!(session.game().current_player(), Player::Red);
    }

    #[test]
    fn test_recording_closed_at_game_end() {
        let mut session = humans(true);
        for (row, col, letter) in [
            (0, 0, Letter::S),
            (1, 0, Letter::S),
            (0, 1, Letter::O),
            (1, 1, Letter::O),
            (0, 2, Letter::S),
        ] {
            session.submit_move(Move::new(row, col, letter)).unwrap();
        }

        let recording = session.take_recording().unwrap();
        assert_eq!(recording.moves().len(), 5);
        assert_eq!(recording.final_state().winner, Some(Player::Blue));
        assert_eq!(recording.final_state().blue_score, 1);
        assert_eq!(recording.player_type(Player::Red), SourceKind::Human);
        assert!(session.take_recording().is_none());
    }

    #[tokio::test]
    async fn test_heuristics_play_to_the_end() {
        let mut session = GameSession::new(
            4,
            RuleVariant::MostMatchesWins,
            Box::new(HeuristicSource::with_seed("A", 1)),
            Box::new(HeuristicSource::with_seed("B", 2)),
            true,
        )
        .unwrap();

        let turn = session.play_until_input().await.unwrap();
        assert_eq!(turn, Turn::Finished(session.game().status()));
        assert!(session.game().board().is_full());

        let recording = session.take_recording().unwrap();
        assert_eq!(recording.moves().len(), 16);
        assert_eq!(recording.player_type(Player::Blue), SourceKind::Computer);

        let replayed = crate::recording::replay(&recording).unwrap();
        assert_eq!(replayed.board(), session.game().board());
        assert_eq!(replayed.status(), session.game().status());
    }

    #[test]
    fn test_new_game_discards_partial_recording() {
        let mut session = humans(true);
        session.submit_move(Move::new(0, 0, Letter::S)).unwrap();
        session.new_game(Some(5), Some(RuleVariant::MostMatchesWins)).unwrap();
        assert_eq!(session.game().size(), 5);
        assert!(session.game().history().is_empty());
        assert!(session.take_recording().is_none());

        assert!(session.new_game(Some(1), None).is_err());
        assert_eq!(session.game().size(), 5);
    }

    #[test]
    fn test_recording_enabled_mid_game_waits_for_next_game() {
        let mut session = humans(false);
        session.submit_move(Move::new(0, 0, Letter::S)).unwrap();
        session.set_recording(true);
        assert!(session.is_recording());
        for (row, col, letter) in [(1, 0, Letter::S), (0, 1, Letter::O), (1, 1, Letter::O), (0, 2, Letter::S)] {
            session.submit_move(Move::new(row, col, letter)).unwrap();
        }
        assert!(session.game().is_over());
        assert!(session.take_recording().is_none());
    }
}
