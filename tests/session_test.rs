//! Whole games between computer players, recorded and replayed.

use strictly_sos::{
    GameSession, GameState, GameStatus, HeuristicSource, HumanSource, Letter, Move, MoveSource,
    MoveSourceError, Player, Recording, RuleVariant, SessionError, SourceKind, Turn, replay,
};

/// A source that never manages to produce a move.
struct GivesUp;

#[async_trait::async_trait]
impl MoveSource for GivesUp {
    async fn get_move(&mut self, _game: &GameState) -> Result<Option<Move>, MoveSourceError> {
        Err(MoveSourceError::Exhausted {
            source_name: self.name().to_string(),
            attempts: 3,
            last_error: "no move in reply".to_string(),
        })
    }

    fn name(&self) -> &str {
        "Quitter"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Llm
    }
}

fn computers(size: usize, variant: RuleVariant, seed: u64) -> GameSession {
    GameSession::new(
        size,
        variant,
        Box::new(HeuristicSource::with_seed("Blue bot", seed)),
        Box::new(HeuristicSource::with_seed("Red bot", seed + 1000)),
        true,
    )
    .unwrap()
}

#[tokio::test]
async fn test_first_match_games_end_on_first_score_or_full_board() {
    for seed in 0..20 {
        let mut session = computers(4, RuleVariant::FirstMatchWins, seed);
        let turn = session.play_until_input().await.unwrap();
        let game = session.game();

        assert_eq!(turn, Turn::Finished(game.status()));
        match game.status() {
            GameStatus::Won(winner) => {
                // One placement can complete several lines at once.
                assert!(game.score(winner) >= 1, "seed {seed}");
                assert_eq!(game.score(winner.opponent()), 0, "seed {seed}");
                assert_eq!(game.history().last().unwrap().player, winner);
            }
            GameStatus::Draw => {
                assert!(game.board().is_full(), "seed {seed}");
                assert_eq!((game.blue_score(), game.red_score()), (0, 0));
            }
            GameStatus::InProgress => panic!("seed {seed}: game did not finish"),
        }
    }
}

#[tokio::test]
async fn test_most_matches_games_fill_the_board() {
    for seed in 0..10 {
        let mut session = computers(5, RuleVariant::MostMatchesWins, seed);
        session.play_until_input().await.unwrap();
        let game = session.game();

        assert!(game.board().is_full(), "seed {seed}");
        assert_eq!(game.history().len(), 25);
        let (blue, red) = (game.blue_score(), game.red_score());
        let expected = match blue.cmp(&red) {
            std::cmp::Ordering::Greater => GameStatus::Won(Player::Blue),
            std::cmp::Ordering::Less => GameStatus::Won(Player::Red),
            std::cmp::Ordering::Equal => GameStatus::Draw,
        };
        assert_eq!(game.status(), expected, "seed {seed}");
        assert_eq!(
            game.completed_sequences().len() as u32,
            blue + red,
            "seed {seed}"
        );
    }
}

#[tokio::test]
async fn test_recorded_games_replay_identically() {
    let dir = tempfile::tempdir().unwrap();
    for (variant, seed) in [
        (RuleVariant::FirstMatchWins, 3),
        (RuleVariant::MostMatchesWins, 4),
        (RuleVariant::MostMatchesWins, 5),
    ] {
        let mut session = computers(6, variant, seed);
        session.play_until_input().await.unwrap();
        let recording = session.take_recording().unwrap();

        let path = dir.path().join(format!("{variant}_{seed}.json"));
        recording.save_to(&path).unwrap();
        let loaded = Recording::load(&path).unwrap();

        let replayed = replay(&loaded).unwrap();
        let original = session.game();
        assert_eq!(replayed.board(), original.board());
        assert_eq!(replayed.blue_score(), original.blue_score());
        assert_eq!(replayed.red_score(), original.red_score());
        assert_eq!(replayed.winner(), original.winner());
        assert_eq!(replayed.history(), original.history());
    }
}

#[tokio::test]
async fn test_same_seeds_same_game() {
    let mut first = computers(5, RuleVariant::MostMatchesWins, 42);
    let mut second = computers(5, RuleVariant::MostMatchesWins, 42);
    first.play_until_input().await.unwrap();
    second.play_until_input().await.unwrap();
    assert_eq!(first.game().history(), second.game().history());
}

#[tokio::test]
async fn test_mixed_session_hands_turn_to_human() {
    let mut session = GameSession::new(
        3,
        RuleVariant::MostMatchesWins,
        Box::new(HumanSource::new("Alice")),
        Box::new(HeuristicSource::with_seed("Bot", 9)),
        false,
    )
    .unwrap();

    assert_eq!(
        session.play_until_input().await.unwrap(),
        Turn::Awaiting(Player::Blue)
    );
    session.submit_move(Move::new(1, 1, Letter::O)).unwrap();

    // The bot answers, then it is Alice's turn again.
    assert_eq!(
        session.play_until_input().await.unwrap(),
        Turn::Awaiting(Player::Blue)
    );
    assert_eq!(session.game().history().len(), 2);
    assert_eq!(session.game().history()[1].player, Player::Red);
}

#[test]
fn test_out_of_range_submission_rejected() {
    let mut session = GameSession::new(
        3,
        RuleVariant::FirstMatchWins,
        Box::new(HumanSource::new("Alice")),
        Box::new(HumanSource::new("Bob")),
        false,
    )
    .unwrap();

    let err = session.submit_move(Move::new(3, 0, Letter::S)).unwrap_err();
    assert!(matches!(err, SessionError::Game(_)));
    assert!(session.game().history().is_empty());
    assert_eq!(session.game().current_player(), Player::Blue);
}

#[tokio::test]
async fn test_exhausted_source_leaves_game_untouched() {
    let mut session = GameSession::new(
        3,
        RuleVariant::FirstMatchWins,
        Box::new(GivesUp),
        Box::new(HumanSource::new("Bob")),
        true,
    )
    .unwrap();

    for _ in 0..2 {
        let err = session.request_move().await.unwrap_err();
        match err {
            SessionError::Source(MoveSourceError::Exhausted {
                source_name,
                attempts,
                ..
            }) => {
                assert_eq!(source_name, "Quitter");
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(session.game().current_player(), Player::Blue);
        assert!(session.game().history().is_empty());
        assert_eq!(session.game().status(), GameStatus::InProgress);
        assert!(session.take_recording().is_none());
    }
    assert!(session.play_until_input().await.is_err());

    // The game can still be finished by typed moves, and the recording
    // holds only those.
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
    assert_eq!(recording.moves()[0].player, Player::Blue);
    assert_eq!(recording.player_type(Player::Blue), SourceKind::Llm);
    assert_eq!(recording.final_state().winner, Some(Player::Blue));
}
