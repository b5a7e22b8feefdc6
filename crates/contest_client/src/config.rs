//! Client configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{ConfigError, GameKind, SessionSettings};

/// Banner strings shown when a round ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    /// Connect4, player 0 won.
    red_wins: String,
    /// Connect4, player 1 won.
    yellow_wins: String,
    /// Pingouins, player 0 won.
    blue_wins: String,
    /// Pingouins, player 1 won.
    green_wins: String,
    /// Nobody won.
    drawn: String,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            red_wins: "Red wins!".to_string(),
            yellow_wins: "Yellow wins!".to_string(),
            blue_wins: "Blue wins!".to_string(),
            green_wins: "Green wins!".to_string(),
            drawn: "Draw game".to_string(),
        }
    }
}

impl Language {
    /// Banner for player `number` winning `game`.
    pub fn winner(&self, game: GameKind, number: u32) -> &str {
        match (game, number) {
            (GameKind::Connect4, 0) => &self.red_wins,
            (GameKind::Connect4, _) => &self.yellow_wins,
            (GameKind::Pingouins, 0) => &self.blue_wins,
            (GameKind::Pingouins, _) => &self.green_wins,
        }
    }
}

/// Configuration for a client session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the contest server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Game to play.
    #[serde(default = "default_game")]
    game: GameKind,

    /// Agent type of each player (alpha, mcts, random or player).
    #[serde(default = "default_agents")]
    agents: [String; 2],

    /// Seed for the server's randomness.
    #[serde(default)]
    seed: u64,

    /// Free reference attached to the contest.
    #[serde(default)]
    player_id: Option<String>,

    /// Interval between two event polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Interval between two frames, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    frame_interval_ms: u64,

    /// Banner strings.
    #[serde(default)]
    language: Language,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_game() -> GameKind {
    GameKind::Connect4
}

fn default_agents() -> [String; 2] {
    ["player".to_string(), "mcts".to_string()]
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_frame_interval_ms() -> u64 {
    33
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            game: default_game(),
            agents: default_agents(),
            seed: 0,
            player_id: None,
            poll_interval_ms: default_poll_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
            language: Language::default(),
        }
    }
}

/// Values given on the command line, each replacing the file's.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Server URL.
    pub server_url: Option<String>,
    /// Game.
    pub game: Option<GameKind>,
    /// First player's agent type.
    pub agent1: Option<String>,
    /// Second player's agent type.
    pub agent2: Option<String>,
    /// Seed.
    pub seed: Option<u64>,
    /// Contest reference.
    pub player_id: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(game = %config.game, server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces file values with the ones given on the command line.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(server_url) = overrides.server_url {
            self.server_url = server_url;
        }
        if let Some(game) = overrides.game {
            self.game = game;
        }
        if let Some(agent) = overrides.agent1 {
            self.agents[0] = agent;
        }
        if let Some(agent) = overrides.agent2 {
            self.agents[1] = agent;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if overrides.player_id.is_some() {
            self.player_id = overrides.player_id;
        }
        self
    }

    /// Event poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Frame interval.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// What the session creates on the server.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::new(
            self.game,
            self.agents.clone(),
            self.seed,
            self.player_id.clone(),
        )
    }
}
