//! Connect4 rendering.

use contest_games::connect4::{Cell, Column, GridLayout, ROWS};
use contest_games::{Outcome, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::widgets::{draw_banner, put_centered};
use crate::{Connect4Controller, GameKind, Language};

const STONE: &str = "●";
const HOLE: &str = "◦";
const SLOT: &str = "▽";

fn stone_color(player: u32) -> Color {
    if player == 0 { Color::Red } else { Color::Yellow }
}

fn stone_style(player: u32) -> Style {
    Style::default()
        .fg(stone_color(player))
        .add_modifier(Modifier::BOLD)
}

/// Draws the grid, falling and hovering stones, and the banner.
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    surface: Surface,
    game: &Connect4Controller,
    language: &Language,
) {
    let layout = GridLayout::for_surface(surface);
    let board = game.board();
    let buf = frame.buffer_mut();

    for column in Column::all() {
        for row in 0..ROWS as u8 {
            let center = layout.hole_center(column, row);
            match board.cell(column, row) {
                Cell::Empty => {
                    put_centered(buf, area, center, HOLE, Style::default().fg(Color::Blue))
                }
                Cell::Stone(player) => put_centered(buf, area, center, STONE, stone_style(player)),
            }
        }
    }

    if let Some(request) = game.pending() {
        let armed = Style::default().fg(Color::DarkGray);
        for column in request.moves() {
            put_centered(buf, area, layout.slot_center(*column), SLOT, armed);
        }
    }

    for anim in board.falling() {
        let stone = anim.target();
        let from = layout.slot_center(stone.from);
        let to = layout.hole_center(stone.column, stone.row);
        let at = from.lerp(to, anim.clamped());
        put_centered(buf, area, at, STONE, stone_style(stone.player));
    }

    if let Some((at, player)) = game.hovering_stone(surface) {
        put_centered(buf, area, at, STONE, stone_style(player));
    }

    match game.outcome() {
        Some(Outcome::Winner(player)) => draw_banner(
            frame,
            area,
            language.winner(GameKind::Connect4, player),
            if player == 0 { Color::Red } else { Color::Yellow },
        ),
        Some(Outcome::Draw) => draw_banner(frame, area, language.drawn(), Color::DarkGray),
        None => {}
    }
}
