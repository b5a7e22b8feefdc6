//! Tests for event dispatch and busy gating.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    ScriptedServer, event, get_agent_action, pingouins_state, round_end, round_start,
    think_progress, turn_end,
};
use contest_client::{EventDispatcher, GameController, GameKind, ServerClient, ThinkIndicator};
use contest_games::Outcome;
use contest_games::connect4::{Cell, Column, DROP_DURATION};
use serde_json::json;

struct Harness {
    server: Arc<ScriptedServer>,
    client: Arc<dyn ServerClient>,
    dispatcher: EventDispatcher,
    controller: GameController,
    indicator: ThinkIndicator,
}

impl Harness {
    fn connect4() -> Self {
        Self::new(GameKind::Connect4)
    }

    fn new(game: GameKind) -> Self {
        let server = ScriptedServer::open();
        let client: Arc<dyn ServerClient> = server.clone();
        Self {
            server,
            client,
            dispatcher: EventDispatcher::new(),
            controller: GameController::new(game),
            indicator: ThinkIndicator::new(),
        }
    }

    fn tick(&mut self) -> bool {
        self.dispatcher
            .tick(&self.client, &mut self.controller, &mut self.indicator)
    }
}

#[test]
fn test_applies_one_event_per_tick() {
    let mut h = Harness::connect4();
    h.server.push_event(event("Hello", json!({}), None));
    h.server.push_event(event("Hello", json!({}), None));

    assert!(h.tick());
    assert_eq!(h.server.pending_events(), 1);
    assert!(h.tick());
    assert_eq!(h.server.pending_events(), 0);
    assert!(!h.tick());
    assert_eq!(h.dispatcher.applied(), 2);
}

#[test]
fn test_busy_controller_holds_events() {
    let mut h = Harness::connect4();
    h.server.push_event(turn_end("", "1:Yellow/4"));
    h.server.push_event(turn_end("", "0:Red/4"));

    assert!(h.tick());
    assert!(h.controller.is_busy());

    assert!(!h.tick());
    assert!(!h.tick());
    assert_eq!(h.server.pending_events(), 1);

    h.controller.update(DROP_DURATION + Duration::from_millis(100));
    assert!(!h.controller.is_busy());
    let GameController::Connect4(game) = &h.controller else {
        panic!("expected the Connect4 controller");
    };
    assert_eq!(game.board().cell(Column::new(3).unwrap(), 0), Cell::Stone(1));

    assert!(h.tick());
    assert_eq!(h.server.pending_events(), 0);
}

#[test]
fn test_think_progress_and_turn_end_drive_indicator() {
    let mut h = Harness::connect4();
    h.server.push_event(think_progress("1:Yellow", 0.6));
    h.server.push_event(turn_end("", "1:Yellow/2"));

    assert!(h.tick());
    assert!((h.indicator.progress() - 0.6).abs() < 1e-6);

    assert!(h.tick());
    assert_eq!(h.indicator.progress(), 0.0);
}

#[test]
fn test_think_progress_is_clamped() {
    let mut h = Harness::connect4();
    h.server.push_event(think_progress("1:Yellow", 1.7));

    assert!(h.tick());
    assert_eq!(h.indicator.progress(), 1.0);
}

#[test]
fn test_malformed_events_are_dropped() {
    let mut h = Harness::connect4();
    h.server.push_event(event("TurnEnd", json!({"contest": 7}), None));
    h.server.push_event(event("Teleport", json!({}), None));
    h.server
        .push_event(event("GetAgentAction", json!({"contest": 7, "agent": 2, "player": "0:Red"}), None));
    h.server.push_event(event(
        "RoundStart",
        json!({"contest": 7, "round_number": 0, "game_state": "not base64!"}),
        None,
    ));

    for _ in 0..4 {
        assert!(h.tick());
    }
    assert_eq!(h.dispatcher.dropped(), 4);
    assert_eq!(h.dispatcher.applied(), 0);
    assert!(!h.controller.is_busy());
}

#[test]
fn test_round_end_records_outcome() {
    let mut h = Harness::connect4();
    h.server.push_event(round_end("End", "0:Red>0;1:Yellow>1"));

    assert!(h.tick());
    assert_eq!(h.controller.outcome(), Some(Outcome::Winner(1)));
}

#[test]
fn test_terminal_round_without_winner_is_a_draw() {
    let mut h = Harness::connect4();
    h.server.push_event(round_end("End", "0:Red>0;1:Yellow>0"));

    assert!(h.tick());
    assert_eq!(h.controller.outcome(), Some(Outcome::Draw));
}

#[tokio::test]
async fn test_action_request_event_starts_a_fetch() {
    let mut h = Harness::new(GameKind::Pingouins);
    h.server
        .with(|s| s.legal_actions = vec!["(0,1,RR,1)".to_string(), "(0,1,TR,2)".to_string()]);
    h.server.push_event(round_start(&pingouins_state(0, 0)));
    h.server.push_event(get_agent_action(11, "0:Blue"));

    assert!(h.tick());
    assert!(h.tick());
    assert!(h.controller.is_fetching());

    for _ in 0..100 {
        if !h.controller.is_fetching() {
            break;
        }
        tokio::task::yield_now().await;
        h.controller.update(Duration::ZERO);
    }
    assert!(h.controller.awaits_input());
    assert!(h.server.replies().is_empty());
    assert_eq!(h.dispatcher.applied(), 2);
}
