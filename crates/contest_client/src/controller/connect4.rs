//! Connect4 controller.

use std::sync::Arc;
use std::time::Duration;

use contest_games::connect4::{Column, Connect4Board, GridLayout, SERVER_DROP_COLUMN};
use contest_games::{
    LegalAction, Outcome, Player, PlayerAction, PlayerReward, Point, Surface, is_terminal_state,
};
use tracing::{debug, error, info, instrument};

use super::request::{PendingActionRequest, RequestSlot};
use crate::{AgentHandle, ContestHandle, Gesture, RequestId, ServerClient};

/// Drives the Connect4 board from server events and local input.
#[derive(Debug, Default)]
pub struct Connect4Controller {
    board: Connect4Board,
    request: RequestSlot<Column>,
    local_player: Option<u32>,
    pointer: Option<Point>,
    outcome: Option<Outcome>,
}

impl Connect4Controller {
    /// Creates a controller over an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The board.
    pub fn board(&self) -> &Connect4Board {
        &self.board
    }

    /// Round outcome once known.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The armed request, if the local player must choose.
    pub fn pending(&self) -> Option<&PendingActionRequest<Column>> {
        self.request.armed()
    }

    /// True while legal actions are being fetched.
    pub fn is_fetching(&self) -> bool {
        self.request.is_fetching()
    }

    /// Advances falling stones and collects fetched legal actions.
    pub fn update(&mut self, dt: Duration) {
        self.board.update(dt);
        if let Some(request) = self.request.poll() {
            let columns: Vec<u8> = request.moves().iter().map(Column::index).collect();
            debug!(?columns, "Columns armed");
        }
    }

    /// True while any stone falls.
    pub fn is_busy(&self) -> bool {
        self.board.is_busy()
    }

    /// Nothing to set up; the grid starts empty.
    #[instrument(skip(self, _game_state))]
    pub fn round_start(&mut self, contest: ContestHandle, round_number: u32, _game_state: &str) {
        debug!("Round started");
    }

    /// Nothing to do at turn start.
    #[instrument(skip(self, _game_state, players))]
    pub fn turn_start(
        &mut self,
        contest: ContestHandle,
        round_number: u32,
        step: u32,
        _game_state: &str,
        players: &[Player],
    ) {
        debug!(players = players.len(), "Turn started");
    }

    /// Drops the stone of a move made on the server side.
    ///
    /// A move made through this client was dropped when it was confirmed.
    #[instrument(skip(self, _game_state, actions))]
    pub fn turn_end(&mut self, contest: ContestHandle, _game_state: &str, actions: &[PlayerAction]) {
        let local = self.local_player.take();
        let Some(action) = actions.first() else {
            error!("Turn ended without any action");
            return;
        };
        if Some(action.player.number) == local {
            return;
        }
        match Column::decode(&action.action) {
            Ok(LegalAction::Move(column)) => {
                debug!(%column, player = %action.player, "Server move");
                self.board
                    .drop_stone(SERVER_DROP_COLUMN, column, action.player.number);
            }
            Ok(LegalAction::Pass) => debug!(player = %action.player, "Server player passed"),
            Err(err) => error!(error = %err, "Malformed Connect4 action"),
        }
    }

    /// Records the winner, or a draw on a terminal state.
    #[instrument(skip(self, game_state, rewards))]
    pub fn round_end(&mut self, contest: ContestHandle, game_state: &str, rewards: &[PlayerReward]) {
        self.outcome = Outcome::from_rewards(rewards, is_terminal_state(game_state));
        info!(outcome = ?self.outcome, "Round ended");
    }

    /// Opens an action request for the local player.
    #[instrument(skip(self, client))]
    pub fn get_agent_action(
        &mut self,
        client: &Arc<dyn ServerClient>,
        contest: ContestHandle,
        agent: AgentHandle,
        request_id: RequestId,
        player: Player,
    ) {
        let number = player.number;
        if self
            .request
            .fetch(client, contest, agent, request_id, player, Column::decode)
        {
            self.local_player = Some(number);
        }
    }

    /// Column the pointer snaps to, among the armed ones.
    pub fn magnetic_column(&self, surface: Surface) -> Option<Column> {
        let request = self.request.armed()?;
        let pointer = self.pointer?;
        GridLayout::for_surface(surface).magnetic_column(pointer, request.moves())
    }

    /// Where the hovering stone is drawn, and for whom.
    pub fn hovering_stone(&self, surface: Surface) -> Option<(Point, u32)> {
        let request = self.request.armed()?;
        let pointer = self.pointer?;
        let at = match self.magnetic_column(surface) {
            Some(column) => GridLayout::for_surface(surface).slot_center(column),
            None => pointer,
        };
        Some((at, request.player().number))
    }

    /// Applies a pointer gesture; a confirmed column is dropped and sent.
    pub fn handle_gesture(&mut self, gesture: Gesture, surface: Surface, client: &dyn ServerClient) {
        match gesture {
            Gesture::Hover(at) => self.pointer = Some(at),
            Gesture::Cancel => {}
            Gesture::Confirm(at) => {
                self.pointer = Some(at);
                let Some(column) = self.magnetic_column(surface) else {
                    return;
                };
                let Some(request) = self.request.take() else {
                    return;
                };
                let player = request.player().number;
                self.board.drop_stone(column, column, player);
                request.reply(client, &column.encode());
            }
        }
    }
}
