//! Strictly SOS - terminal game and replay viewer.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use strictly_sos::{PlayOptions, run_play, run_replay};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (API keys)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Play {
            size,
            mode,
            blue,
            red,
            record,
            recordings_dir,
            llm_config,
            seed,
            think_ms,
        } => {
            info!(size, %mode, %blue, %red, record, "Starting game");
            run_play(PlayOptions {
                size,
                mode,
                blue,
                red,
                record,
                recordings_dir,
                llm_config,
                seed,
                think_time: Duration::from_millis(think_ms),
            })
            .await
        }
        Command::Replay { file, delay_ms } => {
            info!(file = %file.display(), "Starting replay");
            run_replay(file, Duration::from_millis(delay_ms)).await
        }
    }
}
