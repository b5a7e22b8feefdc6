//! Tests for the game controllers: action requests, gestures and animations.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedServer, pingouins_state};
use contest_client::{GameController, GameKind, Gesture, ServerClient};
use contest_client::{AgentHandle, ContestHandle, RequestId};
use contest_games::connect4::{Cell, Column, GridLayout};
use contest_games::pingouins::{HexCoord, HexLayout, HexMove, MOVE_DURATION, Team};
use contest_games::{LegalAction, Outcome, Player, PlayerAction, Point, Surface};

const CONTEST: ContestHandle = ContestHandle(7);
const AGENT: AgentHandle = AgentHandle(2);

fn surface() -> Surface {
    Surface::new(80.0, 44.0)
}

/// Lets the legal-action fetch finish and arms the request.
async fn settle(controller: &mut GameController) {
    for _ in 0..100 {
        if !controller.is_fetching() {
            return;
        }
        tokio::task::yield_now().await;
        controller.update(Duration::ZERO);
    }
    panic!("legal actions never arrived");
}

async fn armed(game: GameKind, legal: &[&str], player: Player) -> (Arc<ScriptedServer>, GameController) {
    let server = ScriptedServer::open();
    server.with(|s| s.legal_actions = legal.iter().map(|a| a.to_string()).collect());
    let client: Arc<dyn ServerClient> = server.clone();
    let mut controller = GameController::new(game);
    if game == GameKind::Pingouins {
        controller.round_start(CONTEST, 0, &pingouins_state(0, 0));
    }
    controller.get_agent_action(&client, CONTEST, AGENT, RequestId(11), player);
    settle(&mut controller).await;
    (server, controller)
}

fn connect4(controller: &GameController) -> &contest_client::Connect4Controller {
    match controller {
        GameController::Connect4(game) => game,
        GameController::Pingouins(_) => panic!("expected the Connect4 controller"),
    }
}

fn pingouins(controller: &GameController) -> &contest_client::PingouinsController {
    match controller {
        GameController::Pingouins(game) => game,
        GameController::Connect4(_) => panic!("expected the Pingouins controller"),
    }
}

fn decode(action: &str) -> HexMove {
    match HexMove::decode(action).unwrap() {
        LegalAction::Move(mv) => mv,
        LegalAction::Pass => panic!("expected a move"),
    }
}

#[tokio::test]
async fn test_pass_is_answered_without_arming() {
    let (server, controller) = armed(GameKind::Connect4, &["()"], Player::new(0, "Red")).await;

    assert_eq!(server.replies(), [(RequestId(11), "()".to_string())]);
    assert!(!controller.awaits_input());
}

#[tokio::test]
async fn test_pingouins_pass_is_answered_without_arming() {
    let (server, controller) = armed(GameKind::Pingouins, &["()"], Player::new(0, "Blue")).await;

    assert_eq!(server.replies(), [(RequestId(11), "()".to_string())]);
    assert!(!controller.awaits_input());
    assert!(pingouins(&controller).board().sources().is_empty());
}

#[tokio::test]
async fn test_connect4_confirm_snaps_to_column_and_replies_once() {
    let (server, mut controller) =
        armed(GameKind::Connect4, &["1", "4", "5"], Player::new(0, "Red")).await;
    assert!(controller.awaits_input());
    assert!(server.replies().is_empty());

    let layout = GridLayout::for_surface(surface());
    let slot = layout.slot_center(Column::new(3).unwrap());
    let near = Point::new(slot.x + 0.3 * layout.cell_size(), slot.y);

    controller.handle_gesture(Gesture::Confirm(near), surface(), server.as_ref());
    controller.handle_gesture(Gesture::Confirm(near), surface(), server.as_ref());

    assert_eq!(server.replies(), [(RequestId(11), "4".to_string())]);
    assert!(!controller.awaits_input());
    assert!(controller.is_busy());
}

#[tokio::test]
async fn test_connect4_confirm_away_from_armed_slots_is_ignored() {
    let (server, mut controller) = armed(GameKind::Connect4, &["1", "4"], Player::new(0, "Red")).await;

    let layout = GridLayout::for_surface(surface());
    let unarmed = layout.slot_center(Column::new(6).unwrap());
    controller.handle_gesture(Gesture::Confirm(unarmed), surface(), server.as_ref());
    controller.handle_gesture(Gesture::Cancel, surface(), server.as_ref());

    assert!(server.replies().is_empty());
    assert!(controller.awaits_input());
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn test_connect4_hovering_stone_follows_magnetism() {
    let (server, mut controller) = armed(GameKind::Connect4, &["2"], Player::new(1, "Yellow")).await;
    let layout = GridLayout::for_surface(surface());
    let slot = layout.slot_center(Column::new(1).unwrap());

    let free = Point::new(slot.x, slot.y - 3.0 * layout.cell_size());
    controller.handle_gesture(Gesture::Hover(free), surface(), server.as_ref());
    assert_eq!(connect4(&controller).hovering_stone(surface()), Some((free, 1)));

    let near = Point::new(slot.x + 0.2 * layout.cell_size(), slot.y);
    controller.handle_gesture(Gesture::Hover(near), surface(), server.as_ref());
    assert_eq!(connect4(&controller).hovering_stone(surface()), Some((slot, 1)));
}

#[tokio::test]
async fn test_connect4_local_move_is_not_dropped_twice() {
    let (server, mut controller) = armed(GameKind::Connect4, &["4"], Player::new(0, "Red")).await;
    let slot = GridLayout::for_surface(surface()).slot_center(Column::new(3).unwrap());
    controller.handle_gesture(Gesture::Confirm(slot), surface(), server.as_ref());

    let actions = [PlayerAction {
        player: Player::new(0, "Red"),
        action: "4".to_string(),
    }];
    controller.turn_end(CONTEST, "", &actions);
    controller.update(Duration::from_secs(1));

    let board = connect4(&controller).board();
    let column = Column::new(3).unwrap();
    assert_eq!(board.cell(column, 0), Cell::Stone(0));
    assert_eq!(board.cell(column, 1), Cell::Empty);
}

#[tokio::test]
async fn test_second_request_while_armed_leaves_the_first_open() {
    let (server, mut controller) = armed(GameKind::Connect4, &["4"], Player::new(0, "Red")).await;
    let client: Arc<dyn ServerClient> = server.clone();

    controller.get_agent_action(&client, CONTEST, AGENT, RequestId(12), Player::new(0, "Red"));
    assert!(!controller.is_fetching());
    assert!(controller.awaits_input());

    let slot = GridLayout::for_surface(surface()).slot_center(Column::new(3).unwrap());
    controller.handle_gesture(Gesture::Confirm(slot), surface(), server.as_ref());

    assert_eq!(server.replies(), [(RequestId(11), "4".to_string())]);
}

#[tokio::test]
async fn test_pingouins_second_request_keeps_the_armed_board() {
    let (server, mut controller) =
        armed(GameKind::Pingouins, &["(0,1,RR,1)"], Player::new(0, "Blue")).await;
    let client: Arc<dyn ServerClient> = server.clone();

    controller.get_agent_action(&client, CONTEST, AGENT, RequestId(12), Player::new(0, "Blue"));

    assert!(controller.awaits_input());
    assert_eq!(pingouins(&controller).board().sources(), [HexCoord::new(0, 1)]);
    assert!(server.replies().is_empty());
}

#[tokio::test]
async fn test_second_request_while_fetching_is_ignored() {
    let server = ScriptedServer::open();
    server.with(|s| s.legal_actions = vec!["()".to_string()]);
    let client: Arc<dyn ServerClient> = server.clone();
    let mut controller = GameController::new(GameKind::Connect4);

    controller.get_agent_action(&client, CONTEST, AGENT, RequestId(11), Player::new(0, "Red"));
    controller.get_agent_action(&client, CONTEST, AGENT, RequestId(12), Player::new(0, "Red"));
    settle(&mut controller).await;

    assert_eq!(server.replies(), [(RequestId(11), "()".to_string())]);
}

#[tokio::test]
async fn test_malformed_legal_actions_close_the_request_with_the_no_op() {
    let (server, controller) =
        armed(GameKind::Pingouins, &["(0,1,RR,1)", "(0,1,UP,1)"], Player::new(0, "Blue")).await;

    assert_eq!(server.replies(), [(RequestId(11), "()".to_string())]);
    assert!(!controller.awaits_input());
    assert!(pingouins(&controller).board().sources().is_empty());
}

#[tokio::test]
async fn test_pingouins_select_cancel_and_commit() {
    let legal = ["(0,1,RR,1)", "(0,1,RR,2)", "(0,1,TR,1)"];
    let (server, mut controller) = armed(GameKind::Pingouins, &legal, Player::new(0, "Blue")).await;
    let source = HexCoord::new(0, 1);
    assert_eq!(pingouins(&controller).board().sources(), [source]);

    let layout = HexLayout::for_surface(surface());
    let at = |coord| layout.tile_center(coord);

    controller.handle_gesture(Gesture::Confirm(at(source)), surface(), server.as_ref());
    let board = pingouins(&controller).board();
    assert_eq!(board.selected(), Some(source));
    let expected: Vec<HexCoord> = legal.iter().map(|a| decode(a).destination()).collect();
    assert_eq!(board.destinations(), expected.as_slice());

    controller.handle_gesture(Gesture::Cancel, surface(), server.as_ref());
    let board = pingouins(&controller).board();
    assert_eq!(board.selected(), None);
    assert!(board.destinations().is_empty());
    assert_eq!(board.sources(), [source]);

    controller.handle_gesture(Gesture::Confirm(at(source)), surface(), server.as_ref());
    controller.handle_gesture(Gesture::Confirm(at(source)), surface(), server.as_ref());
    assert_eq!(pingouins(&controller).board().selected(), None);

    let dest = decode("(0,1,RR,2)").destination();
    controller.handle_gesture(Gesture::Confirm(at(source)), surface(), server.as_ref());
    controller.handle_gesture(Gesture::Confirm(at(dest)), surface(), server.as_ref());
    controller.handle_gesture(Gesture::Confirm(at(dest)), surface(), server.as_ref());

    assert_eq!(server.replies(), [(RequestId(11), "(0,1,RR,2)".to_string())]);
    assert!(!controller.awaits_input());
    assert!(controller.is_busy());
    assert!(pingouins(&controller).board().sources().is_empty());

    controller.update(MOVE_DURATION + Duration::from_millis(100));
    assert!(!controller.is_busy());
    let game = pingouins(&controller);
    assert_eq!(game.board().fish(source), 0);
    let blue = game
        .penguins()
        .iter()
        .find(|p| p.team() == Team::Blue)
        .unwrap();
    assert_eq!(blue.coord(), dest);
}

#[tokio::test]
async fn test_pingouins_gestures_ignored_until_armed() {
    let server = ScriptedServer::open();
    let mut controller = GameController::new(GameKind::Pingouins);
    controller.round_start(CONTEST, 0, &pingouins_state(0, 0));

    let at = HexLayout::for_surface(surface()).tile_center(HexCoord::new(0, 1));
    controller.handle_gesture(Gesture::Confirm(at), surface(), server.as_ref());

    assert_eq!(pingouins(&controller).board().selected(), None);
    assert!(server.replies().is_empty());
}

#[test]
fn test_pingouins_server_move_animates_and_scores() {
    let mut controller = GameController::new(GameKind::Pingouins);
    controller.round_start(CONTEST, 0, &pingouins_state(0, 0));
    assert_eq!(pingouins(&controller).penguins().len(), 2);

    let actions = [PlayerAction {
        player: Player::new(1, "Green"),
        action: "(6,6,LL,1)".to_string(),
    }];
    controller.turn_end(CONTEST, &pingouins_state(0, 1), &actions);

    assert!(controller.is_busy());
    assert_eq!(pingouins(&controller).team_score(Team::Green), 1);

    controller.update(MOVE_DURATION + Duration::from_millis(100));
    assert!(!controller.is_busy());
    let game = pingouins(&controller);
    assert_eq!(game.board().fish(HexCoord::new(6, 6)), 0);
    let green = game
        .penguins()
        .iter()
        .find(|p| p.team() == Team::Green)
        .unwrap();
    assert_eq!(green.coord(), HexCoord::new(5, 6));
}

#[test]
fn test_pingouins_terminal_round_falls_back_to_scores() {
    let mut controller = GameController::new(GameKind::Pingouins);
    controller.round_start(CONTEST, 0, &pingouins_state(3, 5));

    let rewards = contest_games::parse_player_rewards("0:Blue>0;1:Green>0").unwrap();
    let final_state = format!("{}\nEnd", pingouins_state(3, 5));
    controller.round_end(CONTEST, &final_state, &rewards);

    assert_eq!(controller.outcome(), Some(Outcome::Winner(Team::Green.number())));
}

#[test]
fn test_pingouins_terminal_round_with_equal_scores_is_a_draw() {
    let mut controller = GameController::new(GameKind::Pingouins);
    controller.round_start(CONTEST, 0, &pingouins_state(4, 4));

    let rewards = contest_games::parse_player_rewards("0:Blue>0;1:Green>0").unwrap();
    let final_state = format!("{}\nEnd", pingouins_state(4, 4));
    controller.round_end(CONTEST, &final_state, &rewards);

    assert_eq!(controller.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_pingouins_rewards_take_precedence_over_scores() {
    let mut controller = GameController::new(GameKind::Pingouins);
    controller.round_start(CONTEST, 0, &pingouins_state(3, 5));

    let rewards = contest_games::parse_player_rewards("0:Blue>1;1:Green>0").unwrap();
    controller.round_end(CONTEST, "End", &rewards);

    assert_eq!(controller.outcome(), Some(Outcome::Winner(0)));
}
