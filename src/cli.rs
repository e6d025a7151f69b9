//! Command-line interface for ttt_promo.

use clap::{Parser, Subcommand};

/// Tic-tac-toe against a greedy computer, with chat notifications
#[derive(Parser, Debug)]
#[command(name = "ttt_promo")]
#[command(about = "Tic-tac-toe with a chat notification relay", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the notification relay (POST /send-message)
    Relay {
        /// TOML config file; environment variables are used when absent
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a game in the terminal
    Play {
        /// Relay base URL for outcome notifications
        #[arg(long, default_value = "http://localhost:3000")]
        relay_url: String,

        /// Pause before the computer replies, in milliseconds
        #[arg(long, default_value = "300")]
        delay_ms: u64,

        /// Do not send notifications
        #[arg(long)]
        offline: bool,
    },
}
