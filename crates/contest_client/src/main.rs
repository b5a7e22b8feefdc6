//! Contest Client - command-line entry point.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use contest_client::{ClientConfig, ConnectionStatus, HttpServerClient, ServerClient};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Command::Play {
            config, log_file, ..
        } => {
            init_file_tracing(&log_file)?;
            let config = load_config(config.as_deref())?.apply(overrides);
            contest_client::run_terminal(config).await
        }
        Command::Probe { config, .. } => {
            init_stderr_tracing();
            let config = load_config(config.as_deref())?.apply(overrides);
            probe(config).await
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,contest_client=debug".into())
}

/// Logs to a file so the board keeps the terminal.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    match path {
        Some(path) => Ok(ClientConfig::from_file(path)?),
        None => {
            let default = PathBuf::from("contest_client.toml");
            if default.exists() {
                Ok(ClientConfig::from_file(default)?)
            } else {
                info!("No config file, using defaults");
                Ok(ClientConfig::default())
            }
        }
    }
}

/// Performs the handshake and lists the server's games and agents.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn probe(config: ClientConfig) -> Result<()> {
    let client = HttpServerClient::connect(config.server_url(), config.poll_interval());
    while client.status() == ConnectionStatus::Connecting {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    if client.status() == ConnectionStatus::Closed {
        let reason = client.close_reason().unwrap_or_else(|| "unknown".to_string());
        warn!(%reason, "Probe failed");
        anyhow::bail!("Could not connect to {}: {}", config.server_url(), reason);
    }

    let games = client.registered_games().await;
    let agents = client.registered_agents().await;
    println!("Server: {}", config.server_url());
    println!("Games:  {}", games.join(", "));
    println!("Agents: {}", agents.join(", "));
    Ok(())
}
