//! Command-line interface for contest_client.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use contest_client::{ConfigOverrides, GameKind};

/// Contest Client - play Connect4 or Pingouins against a contest server
#[derive(Parser, Debug)]
#[command(name = "contest_client")]
#[command(about = "Terminal client for remote turn-based contests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a contest in the terminal
    Play {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Contest server URL
        #[arg(long)]
        server_url: Option<String>,

        /// Game to play (connect4 or pingouins)
        #[arg(short, long)]
        game: Option<GameKind>,

        /// First player's agent (alpha, mcts, random or player)
        #[arg(long)]
        agent1: Option<String>,

        /// Second player's agent (alpha, mcts, random or player)
        #[arg(long)]
        agent2: Option<String>,

        /// Contest seed
        #[arg(long)]
        seed: Option<u64>,

        /// Reference passed to the server with the contest
        #[arg(long)]
        player_id: Option<String>,

        /// Log file; the terminal is taken by the board
        #[arg(long, default_value = "contest_client.log")]
        log_file: PathBuf,
    },

    /// Check that a contest server answers and list what it offers
    Probe {
        /// Contest server URL
        #[arg(long)]
        server_url: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Command {
    /// Command-line values that replace configuration file values.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Play {
                server_url,
                game,
                agent1,
                agent2,
                seed,
                player_id,
                ..
            } => ConfigOverrides {
                server_url: server_url.clone(),
                game: *game,
                agent1: agent1.clone(),
                agent2: agent2.clone(),
                seed: *seed,
                player_id: player_id.clone(),
            },
            Command::Probe { server_url, .. } => ConfigOverrides {
                server_url: server_url.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}
