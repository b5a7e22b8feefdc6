//! Game controllers.
//!
//! One controller per game, behind the closed [`GameController`] enum. The
//! dispatcher only talks to the enum; each variant owns its board, its
//! animations and its single open action request.

mod connect4;
mod pingouins;
mod request;

pub use connect4::Connect4Controller;
pub use pingouins::PingouinsController;
pub use request::{ActionDecoder, PendingActionRequest};

use std::sync::Arc;
use std::time::Duration;

use contest_games::{Outcome, Player, PlayerAction, PlayerReward, Surface};
use ratatui::{Frame, layout::Rect};

use crate::{AgentHandle, ContestHandle, GameKind, Gesture, Language, RequestId, ServerClient};

/// The active game's controller.
#[derive(Debug)]
pub enum GameController {
    /// Connect4.
    Connect4(Connect4Controller),
    /// Pingouins.
    Pingouins(PingouinsController),
}

impl GameController {
    /// Creates the controller for `game`.
    pub fn new(game: GameKind) -> Self {
        match game {
            GameKind::Connect4 => Self::Connect4(Connect4Controller::new()),
            GameKind::Pingouins => Self::Pingouins(PingouinsController::new()),
        }
    }

    /// Which game this controller plays.
    pub fn game(&self) -> GameKind {
        match self {
            Self::Connect4(_) => GameKind::Connect4,
            Self::Pingouins(_) => GameKind::Pingouins,
        }
    }

    /// Advances animations and collects fetched legal actions.
    pub fn update(&mut self, dt: Duration) {
        match self {
            Self::Connect4(game) => game.update(dt),
            Self::Pingouins(game) => game.update(dt),
        }
    }

    /// True while any animation runs.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Connect4(game) => game.is_busy(),
            Self::Pingouins(game) => game.is_busy(),
        }
    }

    /// True while an armed request waits for the local player.
    pub fn awaits_input(&self) -> bool {
        match self {
            Self::Connect4(game) => game.pending().is_some(),
            Self::Pingouins(game) => game.pending().is_some(),
        }
    }

    /// True while legal actions are being fetched.
    pub fn is_fetching(&self) -> bool {
        match self {
            Self::Connect4(game) => game.is_fetching(),
            Self::Pingouins(game) => game.is_fetching(),
        }
    }

    /// Round outcome once known.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Connect4(game) => game.outcome(),
            Self::Pingouins(game) => game.outcome(),
        }
    }

    /// Round start hook.
    pub fn round_start(&mut self, contest: ContestHandle, round_number: u32, game_state: &str) {
        match self {
            Self::Connect4(game) => game.round_start(contest, round_number, game_state),
            Self::Pingouins(game) => game.round_start(contest, round_number, game_state),
        }
    }

    /// Turn start hook.
    pub fn turn_start(
        &mut self,
        contest: ContestHandle,
        round_number: u32,
        step: u32,
        game_state: &str,
        players: &[Player],
    ) {
        match self {
            Self::Connect4(game) => game.turn_start(contest, round_number, step, game_state, players),
            Self::Pingouins(game) => {
                game.turn_start(contest, round_number, step, game_state, players)
            }
        }
    }

    /// Turn end hook.
    pub fn turn_end(&mut self, contest: ContestHandle, game_state: &str, actions: &[PlayerAction]) {
        match self {
            Self::Connect4(game) => game.turn_end(contest, game_state, actions),
            Self::Pingouins(game) => game.turn_end(contest, game_state, actions),
        }
    }

    /// Round end hook.
    pub fn round_end(&mut self, contest: ContestHandle, game_state: &str, rewards: &[PlayerReward]) {
        match self {
            Self::Connect4(game) => game.round_end(contest, game_state, rewards),
            Self::Pingouins(game) => game.round_end(contest, game_state, rewards),
        }
    }

    /// Opens the action request for the local player.
    pub fn get_agent_action(
        &mut self,
        client: &Arc<dyn ServerClient>,
        contest: ContestHandle,
        agent: AgentHandle,
        request_id: RequestId,
        player: Player,
    ) {
        match self {
            Self::Connect4(game) => {
                game.get_agent_action(client, contest, agent, request_id, player)
            }
            Self::Pingouins(game) => {
                game.get_agent_action(client, contest, agent, request_id, player)
            }
        }
    }

    /// Applies a pointer gesture on a board laid out on `surface`.
    pub fn handle_gesture(&mut self, gesture: Gesture, surface: Surface, client: &dyn ServerClient) {
        match self {
            Self::Connect4(game) => game.handle_gesture(gesture, surface, client),
            Self::Pingouins(game) => game.handle_gesture(gesture, surface, client),
        }
    }

    /// Renders the board onto `area`, laid out on `surface`.
    pub fn draw(&self, frame: &mut Frame, area: Rect, surface: Surface, language: &Language) {
        crate::ui::draw_board(frame, area, surface, self, language);
    }
}
