//! Round outcome from the server's reward list.

use serde::{Deserialize, Serialize};

use crate::PlayerReward;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given player number won.
    Winner(u32),
    /// Nobody won a finished round.
    Draw,
}

impl Outcome {
    /// Decides the outcome of a round.
    ///
    /// A single nonzero reward names the winner. With several nonzero
    /// rewards the unique highest positive one wins. Otherwise a terminal
    /// state is a draw and a non-terminal one has no outcome yet.
    pub fn from_rewards(rewards: &[PlayerReward], terminal: bool) -> Option<Self> {
        let nonzero: Vec<&PlayerReward> = rewards.iter().filter(|r| r.reward != 0.0).collect();

        match nonzero.as_slice() {
            [single] => return Some(Self::Winner(single.player.number)),
            [] => {}
            several => {
                let best = several
                    .iter()
                    .map(|r| r.reward)
                    .fold(f64::NEG_INFINITY, f64::max);
                let leaders: Vec<_> = several.iter().filter(|r| r.reward == best).collect();
                if best > 0.0
                    && let [leader] = leaders.as_slice()
                {
                    return Some(Self::Winner(leader.player.number));
                }
            }
        }

        terminal.then_some(Self::Draw)
    }
}
