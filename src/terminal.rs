//! Plain-text front end: board on stdout, moves typed on stdin.

use crate::config::LlmPlayerConfig;
use crate::players::{SourceKind, build_source, parse_move};
use crate::recording::Replayer;
use crate::session::{GameSession, SessionError, Turn};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use strictly_sos_rules::{GameState, GameStatus, MoveReport, Player, RuleVariant};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, instrument, warn};

/// Settings for an interactive game.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Board size.
    pub size: usize,
    /// Rule variant.
    pub mode: RuleVariant,
    /// Who plays Blue.
    pub blue: SourceKind,
    /// Who plays Red.
    pub red: SourceKind,
    /// Save a recording of each finished game.
    pub record: bool,
    /// Where recordings go.
    pub recordings_dir: PathBuf,
    /// LLM player config file.
    pub llm_config: Option<PathBuf>,
    /// Seed for computer players.
    pub seed: Option<u64>,
    /// Pause before computer moves.
    pub think_time: Duration,
}

/// What the person at the keyboard asked for.
enum Input {
    Quit,
    NewGame,
    Line(String),
}

fn read_input(line: Option<String>) -> Input {
    match line.as_deref().map(str::trim) {
        None => Input::Quit,
        Some(text) if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("q") => {
            Input::Quit
        }
        Some(text) if text.eq_ignore_ascii_case("new") => Input::NewGame,
        Some(text) => Input::Line(text.to_string()),
    }
}

async fn next_input(lines: &mut Lines<BufReader<Stdin>>) -> Result<Input> {
    Ok(read_input(lines.next_line().await?))
}

/// Plays games until the user quits.
#[instrument(skip(options), fields(size = options.size, mode = %options.mode))]
pub async fn run_play(options: PlayOptions) -> Result<()> {
    let llm = options
        .llm_config
        .as_ref()
        .map(LlmPlayerConfig::from_file)
        .transpose()?;

    let blue_name = source_name(Player::Blue, options.blue, llm.as_ref());
    let red_name = source_name(Player::Red, options.red, llm.as_ref());
    let blue = build_source(
        options.blue,
        &blue_name,
        llm.as_ref(),
        options.seed,
        options.think_time,
    )?;
    let red = build_source(
        options.red,
        &red_name,
        llm.as_ref(),
        options.seed.map(|seed| seed.wrapping_add(1)),
        options.think_time,
    )?;

    let mut session = GameSession::new(options.size, options.mode, blue, red, options.record)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{} on a {}x{} board.", options.mode.describe(), options.size, options.size);
    println!("Enter moves as row,col,letter (e.g. 1,2,S). Type 'new' to restart or 'quit' to exit.");
    print_state(session.game());

    loop {
        if session.game().is_over() {
            announce(session.game());
            if let Some(recording) = session.take_recording() {
                let path = recording.save_in(&options.recordings_dir)?;
                println!("Recording saved to {}", path.display());
            }
            println!("Type 'new' for another game or 'quit' to exit.");
            match next_input(&mut lines).await? {
                Input::Quit => break,
                Input::NewGame => start_over(&mut session)?,
                Input::Line(_) => {}
            }
            continue;
        }

        match session.request_move().await {
            Ok(Turn::Played(report)) => {
                println!("{}", describe(&report));
                print_state(session.game());
            }
            Ok(Turn::Finished(_)) => {}
            Ok(Turn::Awaiting(player)) => {
                println!("{} ({}), your move:", player, session.source(player).name());
                match next_input(&mut lines).await? {
                    Input::Quit => break,
                    Input::NewGame => start_over(&mut session)?,
                    Input::Line(text) => match parse_move(&text) {
                        None => println!("Could not read '{}'. Use row,col,letter.", text),
                        Some(mv) => match session.submit_move(mv) {
                            Ok(report) => {
                                println!("{}", describe(&report));
                                print_state(session.game());
                            }
                            Err(e) => println!("Move rejected: {}", e),
                        },
                    },
                }
            }
            Err(e) => {
                warn!(error = %e, "Source failed to move");
                report_failure(&e);
                println!("Press Enter to ask again, 'new' to restart or 'quit' to exit.");
                match next_input(&mut lines).await? {
                    Input::Quit => break,
                    Input::NewGame => start_over(&mut session)?,
                    Input::Line(_) => {}
                }
            }
        }
    }

    info!("Leaving game");
    Ok(())
}

/// Steps through a recording, then checks it ended as recorded.
#[instrument(skip(file, delay), fields(file = %file.display()))]
pub async fn run_replay(file: PathBuf, delay: Duration) -> Result<()> {
    let mut replayer = Replayer::load(&file)?;
    let recording = replayer.recording();
    println!(
        "Replaying {} game on a {}x{} board: Blue ({}) vs Red ({}), {} moves.",
        recording.game_mode(),
        recording.board_size(),
        recording.board_size(),
        recording.player_type(Player::Blue),
        recording.player_type(Player::Red),
        recording.moves().len(),
    );

    let mut game = replayer.new_game()?;
    print_state(&game);
    while let Some(report) = replayer.apply_next(&mut game)? {
        println!(
            "Move {}/{}: {}",
            replayer.current_index(),
            replayer.total(),
            describe(&report)
        );
        print_state(&game);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    replayer.verify_final(&game)?;
    announce(&game);
    println!("Replay matches the recorded result.");
    Ok(())
}

fn source_name(player: Player, kind: SourceKind, llm: Option<&LlmPlayerConfig>) -> String {
    match (kind, llm) {
        (SourceKind::Human, _) => player.to_string(),
        (SourceKind::Llm, Some(config)) => format!("{} ({})", config.name(), player),
        (kind, _) => format!("{} ({})", kind, player),
    }
}

fn start_over(session: &mut GameSession) -> Result<(), SessionError> {
    session.new_game(None, None)?;
    println!("New game.");
    print_state(session.game());
    Ok(())
}

fn describe(report: &MoveReport) -> String {
    let placed = report.placed;
    let mut text = format!(
        "{} placed {} at ({}, {})",
        placed.player, placed.letter, placed.row, placed.col
    );
    match report.points() {
        0 => {}
        1 => text.push_str(" and made an SOS"),
        n => text.push_str(&format!(" and made {} SOS lines", n)),
    }
    text
}

fn print_state(game: &GameState) {
    println!();
    println!("{}", game.board());
    println!(
        "Blue {} - {} Red | {}",
        game.blue_score(),
        game.red_score(),
        match game.status() {
            GameStatus::InProgress => format!("{} to move", game.current_player()),
            status => status.to_string(),
        }
    );
}

fn announce(game: &GameState) {
    match game.status() {
        GameStatus::Won(player) => println!(
            "{} wins, {} to {}.",
            player,
            game.score(player),
            game.score(player.opponent())
        ),
        GameStatus::Draw => println!("Draw, {} all.", game.blue_score()),
        GameStatus::InProgress => {}
    }
}

fn report_failure(error: &SessionError) {
    match error {
        SessionError::Source(e) => println!("No move: {}", e),
        other => println!("Move rejected: {}", other),
    }
}
