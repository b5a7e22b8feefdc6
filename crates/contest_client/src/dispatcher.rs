//! Applies server events to the active controller, one per tick.

use std::sync::Arc;

use tracing::{debug, error, instrument, trace};

use crate::{GameController, LifecycleEvent, ServerClient, ThinkIndicator};

/// Pulls events from the server client and routes them.
///
/// Nothing is pulled while the controller is busy, so an event's animation
/// always finishes before the next event touches the board.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    applied: u64,
    dropped: u64,
}

impl EventDispatcher {
    /// Creates a dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events applied so far.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Events dropped as malformed so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Applies at most one event; returns true when one was consumed.
    #[instrument(level = "trace", skip_all)]
    pub fn tick(
        &mut self,
        client: &Arc<dyn ServerClient>,
        controller: &mut GameController,
        indicator: &mut ThinkIndicator,
    ) -> bool {
        if controller.is_busy() {
            trace!("Controller busy, holding events");
            return false;
        }
        let Some(raw) = client.get_next_event() else {
            return false;
        };

        let event = match LifecycleEvent::try_from(raw) {
            Ok(event) => event,
            Err(err) => {
                error!(error = %err, "Dropping undecodable event");
                self.dropped += 1;
                return true;
            }
        };
        self.applied += 1;

        match event {
            LifecycleEvent::Hello | LifecycleEvent::Goodbye => debug!(?event, "Ignoring"),
            LifecycleEvent::RoundStart {
                contest,
                round_number,
                game_state,
            } => controller.round_start(contest, round_number, &game_state),
            LifecycleEvent::TurnStart {
                contest,
                round_number,
                step,
                game_state,
                players,
            } => controller.turn_start(contest, round_number, step, &game_state, &players),
            LifecycleEvent::TurnEnd {
                contest,
                game_state,
                player_actions,
            } => {
                indicator.set_progress(0.0);
                controller.turn_end(contest, &game_state, &player_actions);
            }
            LifecycleEvent::RoundEnd {
                contest,
                game_state,
                rewards,
            } => controller.round_end(contest, &game_state, &rewards),
            LifecycleEvent::GetAgentAction {
                contest,
                agent,
                request_id,
                player,
            } => controller.get_agent_action(client, contest, agent, request_id, player),
            LifecycleEvent::ThinkProgress {
                player, progress, ..
            } => {
                trace!(%player, progress, "Think progress");
                indicator.set_progress(progress);
            }
        }
        true
    }
}
