//! Lifecycle events pushed by the contest server.
//!
//! Events travel as `[kind, data, id]` triples. The game state inside them
//! is base64 text that decodes to the game's own state format.

use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use contest_games::{
    Player, PlayerAction, PlayerReward, parse_player_actions, parse_player_rewards,
    parse_players,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::{AgentHandle, ContestHandle, EventError, EventErrorKind, RequestId};

/// An undecoded event as queued by the server client.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    /// Event tag, e.g. `TurnEnd`.
    pub kind: String,
    /// Event payload object.
    pub data: Value,
    /// Request id, present on requests.
    pub id: Option<u64>,
}

impl RawEvent {
    /// Creates a new raw event.
    pub fn new(kind: impl Into<String>, data: Value, id: Option<u64>) -> Self {
        Self {
            kind: kind.into(),
            data,
            id,
        }
    }

    /// Splits a wire triple `[kind, data, id]`.
    #[track_caller]
    pub fn from_wire(value: Value) -> Result<Self, EventError> {
        let envelope = |message: &str| EventError::new(EventErrorKind::Envelope(message.into()));
        let Value::Array(items) = value else {
            return Err(envelope("expected an array"));
        };
        let mut items = items.into_iter();
        let kind = match items.next() {
            Some(Value::String(kind)) => kind,
            _ => return Err(envelope("first element must be the event kind")),
        };
        let data = items.next().unwrap_or(Value::Null);
        let id = items.next().and_then(|id| id.as_u64());
        Ok(Self { kind, data, id })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
enum EventKind {
    Hello,
    Goodbye,
    RoundStart,
    TurnStart,
    TurnEnd,
    RoundEnd,
    GetAgentAction,
    ThinkProgress,
}

/// A decoded lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// Connection greeting.
    Hello,
    /// Connection farewell.
    Goodbye,
    /// A round begins.
    RoundStart {
        /// Contest the round belongs to.
        contest: ContestHandle,
        /// 0 for the first round.
        round_number: u32,
        /// Decoded game state text.
        game_state: String,
    },
    /// A turn begins.
    TurnStart {
        /// Contest the turn belongs to.
        contest: ContestHandle,
        /// Current round.
        round_number: u32,
        /// Step within the round.
        step: u32,
        /// Decoded game state text.
        game_state: String,
        /// Players acting this turn.
        players: Vec<Player>,
    },
    /// A turn ended with the listed actions.
    TurnEnd {
        /// Contest the turn belongs to.
        contest: ContestHandle,
        /// Decoded game state text after the turn.
        game_state: String,
        /// Actions taken, in server order.
        player_actions: Vec<PlayerAction>,
    },
    /// A round ended.
    RoundEnd {
        /// Contest the round belongs to.
        contest: ContestHandle,
        /// Decoded final game state text.
        game_state: String,
        /// Rewards per player.
        rewards: Vec<PlayerReward>,
    },
    /// The server waits for this client to choose an action.
    GetAgentAction {
        /// Contest asking.
        contest: ContestHandle,
        /// External agent that must act.
        agent: AgentHandle,
        /// Id to echo back in the reply.
        request_id: RequestId,
        /// Player the agent plays for.
        player: Player,
    },
    /// A server-side agent reports how far its search got.
    ThinkProgress {
        /// Contest the agent plays in.
        contest: ContestHandle,
        /// Thinking player.
        player: Player,
        /// Progress in `[0, 1]`.
        progress: f32,
    },
}

#[derive(Deserialize)]
struct RoundStartData {
    contest: ContestHandle,
    round_number: u32,
    game_state: String,
}

#[derive(Deserialize)]
struct TurnStartData {
    contest: ContestHandle,
    round_number: u32,
    step: u32,
    game_state: String,
    players: String,
}

#[derive(Deserialize)]
struct TurnEndData {
    contest: ContestHandle,
    game_state: String,
    player_actions: String,
}

#[derive(Deserialize)]
struct RoundEndData {
    contest: ContestHandle,
    game_state: String,
    rewards: String,
}

#[derive(Deserialize)]
struct GetAgentActionData {
    contest: ContestHandle,
    agent: AgentHandle,
    player: String,
}

#[derive(Deserialize)]
struct ThinkProgressData {
    contest: ContestHandle,
    player: String,
    progress: f32,
}

/// Decodes a base64 game state into its text form.
#[track_caller]
pub fn decode_game_state(encoded: &str) -> Result<String, EventError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}

fn payload<T: DeserializeOwned>(data: Value) -> Result<T, EventError> {
    Ok(serde_json::from_value(data)?)
}

fn first_player(list: &str) -> Result<Player, EventError> {
    parse_players(list)?
        .into_iter()
        .next()
        .ok_or_else(|| EventError::new(EventErrorKind::MissingField("player")))
}

impl TryFrom<RawEvent> for LifecycleEvent {
    type Error = EventError;

    #[instrument(level = "trace", skip(raw), fields(kind = %raw.kind))]
    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = EventKind::from_str(&raw.kind)
            .map_err(|_| EventError::new(EventErrorKind::UnknownKind(raw.kind.clone())))?;

        let event = match kind {
            EventKind::Hello => Self::Hello,
            EventKind::Goodbye => Self::Goodbye,
            EventKind::RoundStart => {
                let data: RoundStartData = payload(raw.data)?;
                Self::RoundStart {
                    contest: data.contest,
                    round_number: data.round_number,
                    game_state: decode_game_state(&data.game_state)?,
                }
            }
            EventKind::TurnStart => {
                let data: TurnStartData = payload(raw.data)?;
                Self::TurnStart {
                    contest: data.contest,
                    round_number: data.round_number,
                    step: data.step,
                    game_state: decode_game_state(&data.game_state)?,
                    players: parse_players(&data.players)?,
                }
            }
            EventKind::TurnEnd => {
                let data: TurnEndData = payload(raw.data)?;
                Self::TurnEnd {
                    contest: data.contest,
                    game_state: decode_game_state(&data.game_state)?,
                    player_actions: parse_player_actions(&data.player_actions)?,
                }
            }
            EventKind::RoundEnd => {
                let data: RoundEndData = payload(raw.data)?;
                Self::RoundEnd {
                    contest: data.contest,
                    game_state: decode_game_state(&data.game_state)?,
                    rewards: parse_player_rewards(&data.rewards)?,
                }
            }
            EventKind::GetAgentAction => {
                let id = raw
                    .id
                    .ok_or_else(|| EventError::new(EventErrorKind::MissingField("id")))?;
                let data: GetAgentActionData = payload(raw.data)?;
                Self::GetAgentAction {
                    contest: data.contest,
                    agent: data.agent,
                    request_id: RequestId(id),
                    player: first_player(&data.player)?,
                }
            }
            EventKind::ThinkProgress => {
                let data: ThinkProgressData = payload(raw.data)?;
                Self::ThinkProgress {
                    contest: data.contest,
                    player: first_player(&data.player)?,
                    progress: data.progress.clamp(0.0, 1.0),
                }
            }
        };
        Ok(event)
    }
}
