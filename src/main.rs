//! ttt_promo - unified CLI.
//!
//! `relay` runs the notification relay, `play` runs a terminal game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use ttt_promo::{
    GameConfig, GameController, HttpNotifier, NoopNotifier, Notifier, RelayConfig, TokioScheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ttt_promo=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Relay { config, host, port } => run_relay(config, host, port).await,
        Command::Play {
            relay_url,
            delay_ms,
            offline,
        } => run_play(relay_url, delay_ms, offline).await,
    }
}

/// Run the notification relay.
#[instrument]
async fn run_relay(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = match config {
        Some(path) => RelayConfig::from_file(path)?,
        None => RelayConfig::from_env()?,
    }
    .with_bind(host, port);

    info!(?config, "Starting notification relay");
    ttt_promo::relay::serve(config).await?;
    Ok(())
}

/// Run a terminal game.
#[instrument]
async fn run_play(relay_url: String, delay_ms: u64, offline: bool) -> Result<()> {
    let config = GameConfig::default()
        .with_relay_url(relay_url)
        .with_computer_delay_ms(delay_ms);

    let notifier: Box<dyn Notifier> = if offline {
        Box::new(NoopNotifier)
    } else {
        Box::new(HttpNotifier::new(config.relay_url()))
    };

    let mut controller =
        GameController::new(notifier, TokioScheduler, StdRng::from_entropy(), config);
    ttt_promo::terminal::run(&mut controller).await
}
