//! The contest server collaborator.
//!
//! Everything the session and the controllers need from the server goes
//! through [`ServerClient`]. Creation and scheduling RPCs collapse every
//! failure into `None`; the session turns those into terminal statuses.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{ClientError, RawEvent};

/// Server-side contest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestHandle(pub u64);

/// Server-side agent identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentHandle(pub u64);

/// Identifier of an action request, echoed back in the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

/// Connection state of the server link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    /// Handshake in progress.
    Connecting,
    /// Handshake done, link healthy.
    Open,
    /// Handshake failed or the link dropped.
    Closed,
}

/// Games the client knows how to draw.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GameKind {
    /// Column-drop grid.
    Connect4,
    /// Hex-grid penguin hopping.
    Pingouins,
}

/// Collaborator interface to the contest server.
#[async_trait::async_trait]
pub trait ServerClient: Send + Sync {
    /// Current link state.
    fn status(&self) -> ConnectionStatus;

    /// Reason given when the link closed, if any.
    fn close_reason(&self) -> Option<String>;

    /// Games the server can host.
    async fn registered_games(&self) -> Vec<String>;

    /// Agent types the server can instantiate.
    async fn registered_agents(&self) -> Vec<String>;

    /// Creates a server-side agent of the given server type name.
    async fn create_agent(&self, game: GameKind, agent: &str) -> Option<AgentHandle>;

    /// Creates an agent whose moves come from this client.
    async fn create_external_agent(&self) -> Option<AgentHandle>;

    /// Creates a contest between two agents.
    async fn create_contest(
        &self,
        game: GameKind,
        agents: [AgentHandle; 2],
        seed: u64,
        player_id: Option<&str>,
    ) -> Option<ContestHandle>;

    /// Runs the next contest step.
    ///
    /// `Some(n)` with `n > 0` means more steps remain, `Some(0)` means the
    /// contest is over and `None` means scheduling failed.
    async fn schedule_contest(&self, contest: ContestHandle) -> Option<u64>;

    /// Legal action strings for `agent`, in server order.
    async fn get_legal_actions(
        &self,
        contest: ContestHandle,
        agent: AgentHandle,
    ) -> Result<Vec<String>, ClientError>;

    /// Sends the chosen action for a request without waiting for the server.
    fn reply_selected_action(&self, request_id: RequestId, action: &str);

    /// Pops the next inbound event.
    fn get_next_event(&self) -> Option<RawEvent>;
}
