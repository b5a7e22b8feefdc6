//! Shared test helpers: a scripted in-memory contest server and event builders.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use contest_client::{
    AgentHandle, ClientError, ConnectionStatus, ContestHandle, GameKind, RawEvent, RequestId,
    ServerClient,
};
use serde_json::{Value, json};

/// Everything the scripted server answers and records.
#[derive(Debug)]
pub struct Script {
    pub status: ConnectionStatus,
    pub close_reason: Option<String>,
    pub games: Vec<String>,
    pub agent_types: Vec<String>,
    pub fail_agents: bool,
    pub next_agent: u64,
    pub contest: Option<ContestHandle>,
    pub schedule: VecDeque<Option<u64>>,
    pub schedule_calls: usize,
    pub legal_actions: Vec<String>,
    pub events: VecDeque<RawEvent>,
    pub replies: Vec<(RequestId, String)>,
    pub created_agents: Vec<String>,
}

/// In-memory [`ServerClient`] driven by a [`Script`].
#[derive(Debug)]
pub struct ScriptedServer {
    script: Mutex<Script>,
}

impl ScriptedServer {
    /// A server whose handshake already succeeded.
    pub fn open() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Script {
                status: ConnectionStatus::Open,
                close_reason: None,
                games: vec!["connect4".into(), "pingouins".into()],
                agent_types: vec!["AlphaZero".into(), "Mcts".into(), "Random".into()],
                fail_agents: false,
                next_agent: 1,
                contest: Some(ContestHandle(7)),
                schedule: VecDeque::new(),
                schedule_calls: 0,
                legal_actions: Vec::new(),
                events: VecDeque::new(),
                replies: Vec::new(),
                created_agents: Vec::new(),
            }),
        })
    }

    /// Edits the script.
    pub fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        f(&mut self.script.lock().unwrap())
    }

    #[allow(dead_code)]
    pub fn push_event(&self, event: RawEvent) {
        self.with(|s| s.events.push_back(event));
    }

    #[allow(dead_code)]
    pub fn replies(&self) -> Vec<(RequestId, String)> {
        self.with(|s| s.replies.clone())
    }

    #[allow(dead_code)]
    pub fn pending_events(&self) -> usize {
        self.with(|s| s.events.len())
    }
}

#[async_trait::async_trait]
impl ServerClient for ScriptedServer {
    fn status(&self) -> ConnectionStatus {
        self.with(|s| s.status)
    }

    fn close_reason(&self) -> Option<String> {
        self.with(|s| s.close_reason.clone())
    }

    async fn registered_games(&self) -> Vec<String> {
        self.with(|s| s.games.clone())
    }

    async fn registered_agents(&self) -> Vec<String> {
        self.with(|s| s.agent_types.clone())
    }

    async fn create_agent(&self, _game: GameKind, agent: &str) -> Option<AgentHandle> {
        self.with(|s| {
            s.created_agents.push(agent.to_string());
            if s.fail_agents {
                return None;
            }
            s.next_agent += 1;
            Some(AgentHandle(s.next_agent))
        })
    }

    async fn create_external_agent(&self) -> Option<AgentHandle> {
        self.with(|s| {
            s.created_agents.push("external".to_string());
            s.next_agent += 1;
            Some(AgentHandle(s.next_agent))
        })
    }

    async fn create_contest(
        &self,
        _game: GameKind,
        _agents: [AgentHandle; 2],
        _seed: u64,
        _player_id: Option<&str>,
    ) -> Option<ContestHandle> {
        self.with(|s| s.contest)
    }

    async fn schedule_contest(&self, _contest: ContestHandle) -> Option<u64> {
        self.with(|s| {
            s.schedule_calls += 1;
            s.schedule.pop_front().flatten()
        })
    }

    async fn get_legal_actions(
        &self,
        _contest: ContestHandle,
        _agent: AgentHandle,
    ) -> Result<Vec<String>, ClientError> {
        Ok(self.with(|s| s.legal_actions.clone()))
    }

    fn reply_selected_action(&self, request_id: RequestId, action: &str) {
        self.with(|s| s.replies.push((request_id, action.to_string())));
    }

    fn get_next_event(&self) -> Option<RawEvent> {
        self.with(|s| s.events.pop_front())
    }
}

/// Base64 form of a game state.
#[allow(dead_code)]
pub fn encode_state(state: &str) -> String {
    STANDARD.encode(state)
}

#[allow(dead_code)]
pub fn event(kind: &str, data: Value, id: Option<u64>) -> RawEvent {
    RawEvent::new(kind, data, id)
}

#[allow(dead_code)]
pub fn round_start(state: &str) -> RawEvent {
    event(
        "RoundStart",
        json!({"contest": 7, "round_number": 0, "game_state": encode_state(state)}),
        None,
    )
}

#[allow(dead_code)]
pub fn turn_end(state: &str, actions: &str) -> RawEvent {
    event(
        "TurnEnd",
        json!({"contest": 7, "game_state": encode_state(state), "player_actions": actions}),
        None,
    )
}

#[allow(dead_code)]
pub fn round_end(state: &str, rewards: &str) -> RawEvent {
    event(
        "RoundEnd",
        json!({"contest": 7, "game_state": encode_state(state), "rewards": rewards}),
        None,
    )
}

#[allow(dead_code)]
pub fn get_agent_action(request_id: u64, player: &str) -> RawEvent {
    event(
        "GetAgentAction",
        json!({"contest": 7, "agent": 2, "player": player}),
        Some(request_id),
    )
}

#[allow(dead_code)]
pub fn think_progress(player: &str, progress: f32) -> RawEvent {
    event(
        "ThinkProgress",
        json!({"contest": 7, "player": player, "progress": progress}),
        None,
    )
}

/// Pingouins fish rows used across tests.
#[allow(dead_code)]
pub const FISH: &str = "\
11111111
12222221
12333321
12300321
12300321
12333321
12222221
11111111";

/// A Pingouins state with one Blue and one Green penguin.
#[allow(dead_code)]
pub fn pingouins_state(blue: i64, green: i64) -> String {
    format!("{FISH}\nBlue:(0,1)>{blue}\nGreen:(6,6)>{green}")
}
