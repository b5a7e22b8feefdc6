//! Pingouins controller.
//!
//! The local player picks a penguin's tile first, then one of the landing
//! tiles the legal moves allow from there. Tapping the picked tile again, or
//! a secondary click, goes back to picking a penguin.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use contest_games::pingouins::{
    HexCoord, HexLayout, HexMove, IceBoard, Penguin, PingouinsState, Team,
};
use contest_games::{
    LegalAction, Outcome, Player, PlayerAction, PlayerReward, Surface, is_terminal_state,
};
use tracing::{debug, error, info, instrument, warn};

use super::request::{PendingActionRequest, RequestSlot};
use crate::{AgentHandle, ContestHandle, Gesture, RequestId, ServerClient};

/// Drives the ice board and penguins from server events and local input.
#[derive(Debug, Default)]
pub struct PingouinsController {
    board: IceBoard,
    penguins: Vec<Penguin>,
    request: RequestSlot<HexMove>,
    local_player: Option<u32>,
    scores: BTreeMap<String, i64>,
    outcome: Option<Outcome>,
}

fn unique<I: IntoIterator<Item = HexCoord>>(coords: I) -> Vec<HexCoord> {
    let mut out: Vec<HexCoord> = Vec::new();
    for coord in coords {
        if !out.contains(&coord) {
            out.push(coord);
        }
    }
    out
}

impl PingouinsController {
    /// Creates a controller over an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ice board.
    pub fn board(&self) -> &IceBoard {
        &self.board
    }

    /// Penguins on the board.
    pub fn penguins(&self) -> &[Penguin] {
        &self.penguins
    }

    /// Latest score per role.
    pub fn scores(&self) -> &BTreeMap<String, i64> {
        &self.scores
    }

    /// Score of a team, 0 before the first turn ends.
    pub fn team_score(&self, team: Team) -> i64 {
        let role = team.to_string();
        self.scores
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&role))
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    /// Round outcome once known.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The armed request, if the local player must choose.
    pub fn pending(&self) -> Option<&PendingActionRequest<HexMove>> {
        self.request.armed()
    }

    /// True while legal actions are being fetched.
    pub fn is_fetching(&self) -> bool {
        self.request.is_fetching()
    }

    /// Advances the board and penguins, and arms fetched legal actions.
    pub fn update(&mut self, dt: Duration) {
        self.board.update(dt);
        for penguin in &mut self.penguins {
            penguin.update(dt);
        }
        if let Some(request) = self.request.poll() {
            let sources = unique(request.moves().iter().map(|mv| mv.from));
            debug!(sources = sources.len(), "Penguins armed");
            self.board.set_selectable_sources(sources);
        }
    }

    /// True while a tile dissolves or a penguin slides.
    pub fn is_busy(&self) -> bool {
        self.board.is_busy() || self.penguins.iter().any(Penguin::is_busy)
    }

    /// Lays out fish and penguins at the start of the first round.
    #[instrument(skip(self, game_state))]
    pub fn round_start(&mut self, contest: ContestHandle, round_number: u32, game_state: &str) {
        if round_number != 0 {
            return;
        }
        let state: PingouinsState = match game_state.parse() {
            Ok(state) => state,
            Err(err) => {
                error!(error = %err, "Malformed Pingouins state");
                return;
            }
        };

        self.board.set_fish(*state.fish());
        self.penguins.clear();
        for placement in state.penguins() {
            let Some(team) = Team::from_role(&placement.role) else {
                warn!(role = %placement.role, "Penguin of unknown team");
                continue;
            };
            let ordinal = self.penguins.iter().filter(|p| p.team() == team).count() as u8 + 1;
            self.penguins
                .push(Penguin::new(team, ordinal, placement.coord));
        }
        self.scores = state.scores().clone();
        info!(penguins = self.penguins.len(), "Board set up");
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

    /// Animates a move made on the server side and records new scores.
    #[instrument(skip(self, game_state, actions))]
    pub fn turn_end(&mut self, contest: ContestHandle, game_state: &str, actions: &[PlayerAction]) {
        let local = self.local_player.take();
        match actions.first() {
            Some(action) if Some(action.player.number) != local => {
                match HexMove::decode(&action.action) {
                    Ok(LegalAction::Move(mv)) => self.play_move(mv),
                    Ok(LegalAction::Pass) => {
                        debug!(player = %action.player, "Server player passed")
                    }
                    Err(err) => error!(error = %err, "Malformed Pingouins action"),
                }
            }
            Some(_) => {}
            None => error!("Turn ended without any action"),
        }

        match game_state.parse::<PingouinsState>() {
            Ok(state) => self.scores = state.scores().clone(),
            Err(err) => error!(error = %err, "Malformed Pingouins state"),
        }
    }

    /// Records the winner from the rewards, or from the scores when the
    /// rewards do not single one out.
    #[instrument(skip(self, game_state, rewards))]
    pub fn round_end(&mut self, contest: ContestHandle, game_state: &str, rewards: &[PlayerReward]) {
        let terminal = is_terminal_state(game_state);
        self.outcome = match Outcome::from_rewards(rewards, terminal) {
            Some(Outcome::Winner(player)) => Some(Outcome::Winner(player)),
            _ if terminal => {
                let blue = self.team_score(Team::Blue);
                let green = self.team_score(Team::Green);
                Some(match blue.cmp(&green) {
                    std::cmp::Ordering::Greater => Outcome::Winner(Team::Blue.number()),
                    std::cmp::Ordering::Less => Outcome::Winner(Team::Green.number()),
                    std::cmp::Ordering::Equal => Outcome::Draw,
                })
            }
            _ => None,
        };
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
            .fetch(client, contest, agent, request_id, player, HexMove::decode)
        {
            self.local_player = Some(number);
            self.board.disarm();
        }
    }

    /// Dissolves the start tile and slides the penguin standing on it.
    fn play_move(&mut self, mv: HexMove) {
        let dest = mv.destination();
        match self
            .penguins
            .iter_mut()
            .find(|p| p.coord() == mv.from && !p.is_busy())
        {
            Some(penguin) => penguin.move_to(dest),
            None => warn!(from = %mv.from, "No penguin on the start tile"),
        }
        self.board.start_dissolve(mv.from);
    }

    /// Applies a pointer gesture.
    pub fn handle_gesture(&mut self, gesture: Gesture, surface: Surface, client: &dyn ServerClient) {
        if self.request.armed().is_none() {
            return;
        }
        let layout = HexLayout::for_surface(surface);
        match gesture {
            Gesture::Hover(at) => {
                let hit = layout.tile_at(at, self.board.selectable().iter().copied());
                self.board.set_highlighted(hit);
            }
            Gesture::Cancel => self.board.clear_selection(),
            Gesture::Confirm(at) => {
                if let Some(selected) = self.board.selected()
                    && layout.tile_contains(layout.tile_center(selected), at)
                {
                    debug!(%selected, "Selection cleared");
                    self.board.clear_selection();
                    return;
                }
                let Some(hit) = layout.tile_at(at, self.board.selectable().iter().copied())
                else {
                    return;
                };
                match self.board.selected() {
                    None => self.select_source(hit),
                    Some(source) => self.commit(source, hit, client),
                }
            }
        }
    }

    fn select_source(&mut self, source: HexCoord) {
        let Some(request) = self.request.armed() else {
            return;
        };
        let destinations = unique(
            request
                .moves()
                .iter()
                .filter(|mv| mv.from == source)
                .map(HexMove::destination),
        );
        debug!(%source, destinations = destinations.len(), "Penguin selected");
        self.board.select_source(source);
        self.board.set_selectable_destinations(destinations);
    }

    fn commit(&mut self, source: HexCoord, dest: HexCoord, client: &dyn ServerClient) {
        let Some(mv) = self.request.armed().and_then(|request| {
            request
                .moves()
                .iter()
                .copied()
                .find(|mv| mv.from == source && mv.destination() == dest)
        }) else {
            warn!(%source, %dest, "No legal move joins the picked tiles");
            return;
        };
        let Some(request) = self.request.take() else {
            return;
        };
        self.board.disarm();
        self.play_move(mv);
        request.reply(client, &mv.encode());
    }
}
