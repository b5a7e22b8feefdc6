//! Contest Client - terminal front end for remote turn-based contests
//!
//! Connects to a contest server over JSON-RPC, creates a two-agent contest
//! of Connect4 or Pingouins, and renders it while the local human plays one
//! side with the mouse.
//!
//! # Architecture
//!
//! - **Server client**: the [`ServerClient`] seam and its HTTP implementation
//! - **Protocol**: wire envelopes decoded into [`LifecycleEvent`]s
//! - **Session**: connection and contest lifecycle state machine, run as its
//!   own task
//! - **Dispatcher**: applies one event per frame to the active controller
//! - **Controllers**: per-game board state, animations and the single open
//!   action request
//! - **Scheduler**: the frame loop's view of all of the above
//! - **UI**: stateless ratatui rendering

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod dispatcher;
mod error;
mod http_client;
mod input;
mod protocol;
mod scheduler;
mod server_client;
mod session;
mod terminal;
mod think;

pub mod ui;

pub use config::{ClientConfig, ConfigOverrides, Language};
pub use controller::{
    ActionDecoder, Connect4Controller, GameController, PendingActionRequest, PingouinsController,
};
pub use dispatcher::EventDispatcher;
pub use error::{ClientError, ConfigError, EventError, EventErrorKind};
pub use http_client::HttpServerClient;
pub use input::{Gesture, InputTracker, PointerButton, PointerEvent};
pub use protocol::{LifecycleEvent, RawEvent, decode_game_state};
pub use scheduler::Scheduler;
pub use server_client::{
    AgentHandle, ConnectionStatus, ContestHandle, GameKind, RequestId, ServerClient,
};
pub use session::{
    AgentKind, SESSION_POLL_INTERVAL, Session, SessionSettings, SessionStatus, SessionStep,
};
pub use terminal::run_terminal;
pub use think::{HIDDEN_HEIGHT, ThinkIndicator};
