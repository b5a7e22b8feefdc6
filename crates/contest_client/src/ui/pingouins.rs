//! Pingouins rendering.

use contest_games::pingouins::{HexCoord, HexLayout, Team};
use contest_games::{Outcome, Point, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::widgets::{draw_banner, put_centered};
use crate::{GameKind, Language, PingouinsController};

fn team_color(team: Team) -> Color {
    match team {
        Team::Blue => Color::LightBlue,
        Team::Green => Color::LightGreen,
    }
}

fn tile_style(game: &PingouinsController, coord: HexCoord) -> Style {
    let board = game.board();
    let base = Style::default().fg(Color::Black).bg(Color::White);
    if board.highlighted() == Some(coord) {
        base.bg(Color::Red)
    } else if board.selected() == Some(coord) {
        base.bg(Color::Magenta)
    } else if board.destinations().contains(&coord) {
        base.bg(Color::Green)
    } else if board.destinations().is_empty() && board.sources().contains(&coord) {
        base.bg(Color::Yellow)
    } else {
        base
    }
}

/// Draws the ice, penguins, scores and the banner.
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    surface: Surface,
    game: &PingouinsController,
    language: &Language,
) {
    let layout = HexLayout::for_surface(surface);
    let board = game.board();
    let buf = frame.buffer_mut();

    for (coord, fish) in board.tiles() {
        let label = format!(" {} ", "*".repeat(fish as usize));
        put_centered(buf, area, layout.tile_center(coord), &label, tile_style(game, coord));
    }

    if let Some(anim) = board.dissolve() {
        let coord = *anim.target();
        let fade = if anim.clamped() < 0.5 {
            Color::Gray
        } else {
            Color::DarkGray
        };
        put_centered(
            buf,
            area,
            layout.tile_center(coord),
            " ~ ",
            Style::default().fg(Color::White).bg(fade),
        );
    }

    for penguin in game.penguins() {
        let label = format!("{}{}", &penguin.team().to_string()[..1], penguin.ordinal());
        let style = Style::default()
            .fg(Color::Black)
            .bg(team_color(penguin.team()))
            .add_modifier(Modifier::BOLD);
        put_centered(buf, area, penguin.position(&layout), &label, style);
    }

    let center = surface.center();
    let offset_x = layout.cell_width() * 4.4;
    let score_y = center.y - layout.cell_height() * 4.4 * 0.75;
    for (team, x) in [
        (Team::Blue, center.x - offset_x),
        (Team::Green, center.x + offset_x),
    ] {
        let label = format!("+{}", game.team_score(team));
        let style = Style::default()
            .fg(team_color(team))
            .add_modifier(Modifier::BOLD);
        put_centered(buf, area, Point::new(x, score_y), &label, style);
    }

    match game.outcome() {
        Some(Outcome::Winner(player)) => draw_banner(
            frame,
            area,
            language.winner(GameKind::Pingouins, player),
            if player == 0 { Color::Blue } else { Color::Green },
        ),
        Some(Outcome::Draw) => draw_banner(frame, area, language.drawn(), Color::DarkGray),
        None => {}
    }
}
