//! Text codec for the server's player, action and reward lists.
//!
//! The server packs per-player information into short `;`-separated
//! strings. Every entry starts with `number:role`, optionally followed by a
//! game action (`/`) or a reward (`>`).

use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use crate::{CodecError, CodecErrorKind};

/// Wire encoding of "no legal move" shared by every game.
pub const NO_OP: &str = "()";

/// A contest participant as named by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Player number (seat index).
    pub number: u32,
    /// Free-form role label, e.g. `Blue`.
    pub role: String,
}

impl Player {
    /// Creates a new player.
    pub fn new(number: u32, role: impl Into<String>) -> Self {
        Self {
            number,
            role: role.into(),
        }
    }

    /// Parses a single `number:role` entry.
    #[track_caller]
    pub fn parse(entry: &str) -> Result<Self, CodecError> {
        let (number, role) = entry
            .split_once(':')
            .ok_or_else(|| CodecError::new(CodecErrorKind::Player(entry.to_string())))?;
        let number = number
            .trim()
            .parse::<u32>()
            .map_err(|_| CodecError::new(CodecErrorKind::Player(entry.to_string())))?;
        Ok(Self::new(number, role.trim()))
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.number, self.role)
    }
}

/// The action a player chose during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    /// Acting player.
    pub player: Player,
    /// Game-specific action string.
    pub action: String,
}

/// The reward a player holds at the end of a round.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReward {
    /// Rewarded player.
    pub player: Player,
    /// Reward value.
    pub reward: f64,
}

/// A decoded legal action: either a real move or the explicit no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalAction<M> {
    /// A move the player may select.
    Move(M),
    /// The player cannot move this turn.
    Pass,
}

/// The armed form of a legal action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSet<M> {
    /// Nothing to choose; reply with [`NO_OP`] at once.
    Pass,
    /// At least one real move to choose from, in server order.
    Moves(Vec<M>),
}

impl<M> ActionSet<M> {
    /// Collapses decoded legal actions into an action set.
    ///
    /// A no-op entry must be the only entry. When it appears next to real
    /// moves the violation is logged and the no-op entries are dropped.
    pub fn from_legal(actions: Vec<LegalAction<M>>) -> Self {
        let total = actions.len();
        let moves: Vec<M> = actions
            .into_iter()
            .filter_map(|action| match action {
                LegalAction::Move(m) => Some(m),
                LegalAction::Pass => None,
            })
            .collect();

        if moves.is_empty() {
            return Self::Pass;
        }
        if moves.len() != total {
            error!(
                passes = total - moves.len(),
                moves = moves.len(),
                "No-op legal action mixed with real moves, dropping the no-op"
            );
        }
        Self::Moves(moves)
    }
}

fn entries(list: &str) -> impl Iterator<Item = &str> {
    list.split(';').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Parses `"p:role;p:role;..."` into players, in order.
#[instrument(level = "trace")]
pub fn parse_players(list: &str) -> Result<Vec<Player>, CodecError> {
    entries(list).map(Player::parse).collect()
}

/// Parses `"p:role/action;..."` into player actions, in order.
#[instrument(level = "trace")]
pub fn parse_player_actions(list: &str) -> Result<Vec<PlayerAction>, CodecError> {
    entries(list)
        .map(|entry| {
            let (number, rest) = entry
                .split_once(':')
                .ok_or_else(|| CodecError::new(CodecErrorKind::PlayerAction(entry.to_string())))?;
            let (role, action) = rest
                .split_once('/')
                .ok_or_else(|| CodecError::new(CodecErrorKind::PlayerAction(entry.to_string())))?;
            let player = Player::parse(&format!("{number}:{role}"))?;
            Ok(PlayerAction {
                player,
                action: action.trim().to_string(),
            })
        })
        .collect()
}

/// Parses `"p:role>reward;..."` into player rewards, in order.
#[instrument(level = "trace")]
pub fn parse_player_rewards(list: &str) -> Result<Vec<PlayerReward>, CodecError> {
    entries(list)
        .map(|entry| {
            let malformed = || CodecError::new(CodecErrorKind::PlayerReward(entry.to_string()));
            let (number, rest) = entry.split_once(':').ok_or_else(malformed)?;
            let (role, reward) = rest.split_once('>').ok_or_else(malformed)?;
            let reward = reward.trim().parse::<f64>().map_err(|_| malformed())?;
            let player = Player::parse(&format!("{number}:{role}"))?;
            Ok(PlayerReward { player, reward })
        })
        .collect()
}

/// True when the last line of a decoded game state is the literal `end`.
pub fn is_terminal_state(state: &str) -> bool {
    state
        .lines()
        .last()
        .is_some_and(|line| line.trim().eq_ignore_ascii_case("end"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_display_matches_wire_form() {
        assert_eq!(Player::new(1, "Green").to_string(), "1:Green");
    }

    #[test]
    fn test_trailing_separator_is_ignored() {
        let players = parse_players("0:Red;1:Yellow;").unwrap();
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn test_terminal_state_detection() {
        assert!(is_terminal_state("0000\nEnd"));
        assert!(is_terminal_state("0000\nend\n"));
        assert!(!is_terminal_state("0000\nBlue:(0,0)>3"));
        assert!(!is_terminal_state(""));
    }
}
