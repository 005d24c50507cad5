//! Command-line interface for strictly_sos.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_sos::{
    DEFAULT_RECORDINGS_DIR, MAX_BOARD_SIZE, MIN_BOARD_SIZE, RuleVariant, SourceKind,
};

/// Strictly SOS - SOS board game with human, heuristic and LLM players
#[derive(Parser, Debug)]
#[command(name = "strictly_sos")]
#[command(about = "Play and replay games of SOS", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Board size (N for an NxN board)
        #[arg(short, long, default_value = "3", value_parser = parse_board_size)]
        size: usize,

        /// Rule variant: simple (first SOS wins) or general (most SOS wins)
        #[arg(short, long, default_value = "Simple")]
        mode: RuleVariant,

        /// Who plays Blue: human, computer or llm
        #[arg(long, default_value = "human")]
        blue: SourceKind,

        /// Who plays Red: human, computer or llm
        #[arg(long, default_value = "computer")]
        red: SourceKind,

        /// Save a recording of each finished game
        #[arg(long)]
        record: bool,

        /// Directory recordings are written to
        #[arg(long, default_value = DEFAULT_RECORDINGS_DIR)]
        recordings_dir: PathBuf,

        /// TOML config for LLM players
        #[arg(long)]
        llm_config: Option<PathBuf>,

        /// Seed for the computer player's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before each computer move, in milliseconds
        #[arg(long, default_value = "0")]
        think_ms: u64,
    },

    /// Step through a recorded game
    Replay {
        /// Recording file
        file: PathBuf,

        /// Pause between moves, in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },
}

fn parse_board_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a board size", value))?;
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(format!(
            "board size must be between {} and {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE
        ));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::try_parse_from(["strictly_sos", "play"]).unwrap();
        match cli.command {
            Command::Play {
                size,
                mode,
                blue,
                red,
                record,
                recordings_dir,
                ..
            } => {
                assert_eq!(size, 3);
                assert_eq!(mode, RuleVariant::FirstMatchWins);
                assert_eq!(blue, SourceKind::Human);
                assert_eq!(red, SourceKind::Computer);
                assert!(!record);
                assert_eq!(recordings_dir, PathBuf::from("recordings"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_play_flags() {
        let cli = Cli::try_parse_from([
            "strictly_sos", "play", "--size", "6", "--mode", "general", "--blue", "llm", "--red",
            "Human", "--record", "--seed", "9",
        ])
        .unwrap();
        match cli.command {
            Command::Play {
                size,
                mode,
                blue,
                red,
                record,
                seed,
                ..
            } => {
                assert_eq!(size, 6);
                assert_eq!(mode, RuleVariant::MostMatchesWins);
                assert_eq!(blue, SourceKind::Llm);
                assert_eq!(red, SourceKind::Human);
                assert!(record);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_small_board_rejected() {
        assert!(Cli::try_parse_from(["strictly_sos", "play", "--size", "2"]).is_err());
        assert!(Cli::try_parse_from(["strictly_sos", "play", "--size", "big"]).is_err());
    }

    #[test]
    fn test_huge_board_rejected() {
        assert!(Cli::try_parse_from(["strictly_sos", "play", "--size", "65"]).is_err());
        assert!(Cli::try_parse_from(["strictly_sos", "play", "--size", "8589934592"]).is_err());
        assert_eq!(parse_board_size("64"), Ok(64));
        assert_eq!(
            parse_board_size("100000"),
            Err("board size must be between 3 and 64".to_string())
        );
    }

    #[test]
    fn test_replay_args() {
        let cli = Cli::try_parse_from(["strictly_sos", "replay", "game.json"]).unwrap();
        match cli.command {
            Command::Replay { file, delay_ms } => {
                assert_eq!(file, PathBuf::from("game.json"));
                assert_eq!(delay_ms, 500);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
