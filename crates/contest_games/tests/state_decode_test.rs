//! Tests for the Pingouins game-state decoder.

use contest_games::is_terminal_state;
use contest_games::pingouins::{HexCoord, PingouinsState};

const FISH: &str = "\
11111111
12222221
12333321
12300321
12300321
12333321
12222221
11111111";

#[test]
fn test_decodes_fish_penguins_and_scores() {
    let text = format!("{FISH}\nBlue:(0,1);(4,2)>7\nGreen:(6,6);(2,5)>5");
    let state: PingouinsState = text.parse().unwrap();

    assert_eq!(state.fish_at(HexCoord::new(0, 0)), 1);
    assert_eq!(state.fish_at(HexCoord::new(3, 2)), 3);
    assert_eq!(state.fish_at(HexCoord::new(3, 3)), 0);
    assert_eq!(state.fish_at(HexCoord::new(9, 0)), 0);

    let coords: Vec<(&str, HexCoord)> = state
        .penguins()
        .iter()
        .map(|p| (p.role.as_str(), p.coord))
        .collect();
    assert_eq!(
        coords,
        [
            ("Blue", HexCoord::new(0, 1)),
            ("Blue", HexCoord::new(4, 2)),
            ("Green", HexCoord::new(6, 6)),
            ("Green", HexCoord::new(2, 5)),
        ]
    );

    assert_eq!(state.score("blue"), Some(7));
    assert_eq!(state.score("Green"), Some(5));
    assert!(!state.is_terminal());
}

#[test]
fn test_trailing_end_marks_terminal() {
    let text = format!("{FISH}\nBlue:>9\nGreen:(1,1)>4\nEnd");
    assert!(is_terminal_state(&text));

    let state: PingouinsState = text.parse().unwrap();
    assert!(state.is_terminal());
    assert_eq!(state.penguins().len(), 1);
    assert_eq!(state.score("Blue"), Some(9));
}

#[test]
fn test_slash_score_separator_is_accepted() {
    let text = format!("{FISH}\nBlue:(0,1)/3\nGreen:(7,7)/2");
    let state: PingouinsState = text.parse().unwrap();
    assert_eq!(state.score("Blue"), Some(3));
    assert_eq!(state.score("Green"), Some(2));
}

#[test]
fn test_rejects_bad_fish_rows() {
    assert!("1111\nBlue:(0,0)>0".parse::<PingouinsState>().is_err());

    let wide = FISH.replacen("11111111", "111111111", 1);
    assert!(wide.parse::<PingouinsState>().is_err());

    let too_many_fish = FISH.replacen("11111111", "11114111", 1);
    assert!(too_many_fish.parse::<PingouinsState>().is_err());
}

#[test]
fn test_rejects_bad_player_lines() {
    let missing_score = format!("{FISH}\nBlue:(0,1)");
    assert!(missing_score.parse::<PingouinsState>().is_err());

    let bad_coord = format!("{FISH}\nBlue:(0;1)>2");
    assert!(bad_coord.parse::<PingouinsState>().is_err());
}
