//! Session lifecycle: connect, create the contest, then schedule it to the end.
//!
//! The session runs as its own task. [`Session::step`] performs one
//! iteration and tells the caller whether to sleep before the next one, so
//! the loop in [`Session::run`] is the only place that waits.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::{AgentHandle, ConnectionStatus, ContestHandle, GameKind, ServerClient};

/// Wait between two checks while connecting or while the board animates.
pub const SESSION_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting for the handshake.
    Connecting,
    /// Creating agents and the contest.
    Initiating,
    /// Scheduling contest steps.
    Playing,
    /// The server could not be reached or refused to set the contest up.
    ErrorNoServer,
    /// The link dropped or scheduling failed mid-contest.
    ErrorServerLost,
    /// The contest finished.
    End,
}

impl SessionStatus {
    /// True for statuses the session never leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::ErrorNoServer | Self::ErrorServerLost | Self::End)
    }

    /// True for the two error statuses.
    pub fn is_error(self) -> bool {
        matches!(self, Self::ErrorNoServer | Self::ErrorServerLost)
    }

    /// True while the board is shown and events are applied.
    pub fn shows_board(self) -> bool {
        matches!(self, Self::Playing | Self::End)
    }

    /// Message shown instead of the board, with the close reason appended
    /// to errors when the server gave one.
    pub fn message(self, close_reason: Option<&str>) -> Option<String> {
        let base = match self {
            Self::Connecting => "Connecting to the contest server ...",
            Self::Initiating => "Game creation ...",
            Self::ErrorNoServer => "Could not connect to the contest server",
            Self::ErrorServerLost => "Connection with the contest server lost",
            Self::Playing | Self::End => return None,
        };
        match close_reason.filter(|reason| self.is_error() && !reason.is_empty()) {
            Some(reason) => Some(format!("{} ({})", base, reason)),
            None => Some(base.to_string()),
        }
    }
}

/// Agent types accepted in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AgentKind {
    /// Server-side AlphaZero agent.
    Alpha,
    /// Server-side Monte Carlo tree search agent.
    Mcts,
    /// Server-side random agent.
    Random,
    /// This client's player.
    Player,
}

impl AgentKind {
    /// Name the server registers this agent type under; `None` for the
    /// external player.
    pub fn server_name(self) -> Option<&'static str> {
        match self {
            Self::Alpha => Some("AlphaZero"),
            Self::Mcts => Some("Mcts"),
            Self::Random => Some("Random"),
            Self::Player => None,
        }
    }
}

/// What a session creates on the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SessionSettings {
    /// Game to play.
    game: GameKind,
    /// Agent type of each player, from the [`AgentKind`] vocabulary.
    agents: [String; 2],
    /// Seed for the server's randomness.
    seed: u64,
    /// Free reference attached to the contest.
    player_id: Option<String>,
}

/// What the session loop should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Wait before stepping again.
    Sleep(Duration),
    /// Step again right away.
    Proceed,
    /// A terminal status was reached.
    Finished,
}

/// The session state machine.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    status: SessionStatus,
    contest: Option<ContestHandle>,
    status_tx: watch::Sender<SessionStatus>,
    busy: watch::Receiver<bool>,
}

impl Session {
    /// Creates a session in `Connecting`.
    ///
    /// `busy` carries the active controller's busy flag. The returned
    /// receiver follows every status change.
    pub fn new(
        settings: SessionSettings,
        busy: watch::Receiver<bool>,
    ) -> (Self, watch::Receiver<SessionStatus>) {
        let (status_tx, status_rx) = watch::channel(SessionStatus::Connecting);
        let session = Self {
            settings,
            status: SessionStatus::Connecting,
            contest: None,
            status_tx,
            busy,
        };
        (session, status_rx)
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Contest created during initiation.
    pub fn contest(&self) -> Option<ContestHandle> {
        self.contest
    }

    /// True while the local board is still animating.
    pub fn is_waiting_for_local_animation(&self) -> bool {
        *self.busy.borrow()
    }

    fn transition(&mut self, next: SessionStatus) {
        if self.status.is_terminal() {
            warn!(from = %self.status, to = %next, "Ignoring transition out of terminal status");
            return;
        }
        info!(from = %self.status, to = %next, "Session status changed");
        self.status = next;
        self.status_tx.send_replace(next);
    }

    /// Runs one iteration of the state machine.
    #[instrument(skip_all, fields(status = %self.status))]
    pub async fn step(&mut self, client: &dyn ServerClient) -> SessionStep {
        match self.status {
            SessionStatus::Connecting => self.step_connecting(client),
            SessionStatus::Initiating => self.step_initiating(client).await,
            SessionStatus::Playing => self.step_playing(client).await,
            SessionStatus::ErrorNoServer | SessionStatus::ErrorServerLost | SessionStatus::End => {
                SessionStep::Finished
            }
        }
    }

    fn step_connecting(&mut self, client: &dyn ServerClient) -> SessionStep {
        match client.status() {
            ConnectionStatus::Connecting => SessionStep::Sleep(SESSION_POLL_INTERVAL),
            ConnectionStatus::Open => {
                self.transition(SessionStatus::Initiating);
                SessionStep::Proceed
            }
            ConnectionStatus::Closed => {
                warn!(reason = ?client.close_reason(), "Handshake failed");
                self.transition(SessionStatus::ErrorNoServer);
                SessionStep::Finished
            }
        }
    }

    async fn step_initiating(&mut self, client: &dyn ServerClient) -> SessionStep {
        let games = client.registered_games().await;
        let agents = client.registered_agents().await;
        info!(?games, ?agents, "Server registry");

        let game = self.settings.game;
        let [first, second] = &self.settings.agents;
        let first = create_agent(client, game, first).await;
        let second = create_agent(client, game, second).await;

        let contest = match (first, second) {
            (Some(first), Some(second)) => {
                client
                    .create_contest(
                        game,
                        [first, second],
                        self.settings.seed,
                        self.settings.player_id.as_deref(),
                    )
                    .await
            }
            _ => None,
        };

        match contest {
            Some(contest) => {
                info!(%contest, %game, "Contest created");
                self.contest = Some(contest);
                self.transition(SessionStatus::Playing);
                SessionStep::Proceed
            }
            None => {
                warn!(%game, "Could not create agents or contest");
                self.transition(SessionStatus::ErrorNoServer);
                SessionStep::Finished
            }
        }
    }

    async fn step_playing(&mut self, client: &dyn ServerClient) -> SessionStep {
        if self.is_waiting_for_local_animation() {
            if client.status() != ConnectionStatus::Open {
                self.transition(SessionStatus::ErrorServerLost);
                return SessionStep::Finished;
            }
            return SessionStep::Sleep(SESSION_POLL_INTERVAL);
        }

        let Some(contest) = self.contest else {
            self.transition(SessionStatus::ErrorServerLost);
            return SessionStep::Finished;
        };

        let again = client.schedule_contest(contest).await;
        match again {
            Some(_) if client.status() != ConnectionStatus::Open => {
                self.transition(SessionStatus::ErrorServerLost);
                SessionStep::Finished
            }
            None => {
                self.transition(SessionStatus::ErrorServerLost);
                SessionStep::Finished
            }
            Some(0) => {
                self.transition(SessionStatus::End);
                SessionStep::Finished
            }
            Some(remaining) => {
                debug!(remaining, "Contest step scheduled");
                SessionStep::Proceed
            }
        }
    }

    /// Drives the session to a terminal status and returns it.
    #[instrument(skip_all)]
    pub async fn run(mut self, client: Arc<dyn ServerClient>) -> SessionStatus {
        loop {
            match self.step(client.as_ref()).await {
                SessionStep::Sleep(delay) => tokio::time::sleep(delay).await,
                SessionStep::Proceed => tokio::task::yield_now().await,
                SessionStep::Finished => break,
            }
        }
        info!(status = %self.status, "Session finished");
        self.status
    }
}

async fn create_agent(
    client: &dyn ServerClient,
    game: GameKind,
    agent: &str,
) -> Option<AgentHandle> {
    let Ok(kind) = AgentKind::from_str(agent) else {
        warn!(agent, "Unknown agent type");
        return None;
    };
    match kind.server_name() {
        Some(name) => client.create_agent(game, name).await,
        None => client.create_external_agent().await,
    }
}
