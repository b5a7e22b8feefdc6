//! Stateless terminal rendering.

mod connect4;
mod pingouins;
mod widgets;

pub use widgets::{cell_at, center_rect, point_at, pointer_event, surface_for};

use contest_games::Surface;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

use crate::{GameController, Language, Scheduler};

/// Splits the screen into title, board and footer.
fn chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(8),    // Board
            Constraint::Length(1), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Part of the screen the board is laid out on.
pub fn board_area(area: Rect) -> Rect {
    chunks(area)[1]
}

/// Draws a game board on `area`.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    surface: Surface,
    controller: &GameController,
    language: &Language,
) {
    match controller {
        GameController::Connect4(game) => connect4::draw(frame, area, surface, game, language),
        GameController::Pingouins(game) => pingouins::draw(frame, area, surface, game, language),
    }
}

/// Draws a whole frame.
pub fn draw(frame: &mut Frame, scheduler: &Scheduler) {
    let [title, board, footer] = chunks(frame.area());
    let controller = scheduler.controller();

    let heading = Paragraph::new(format!("Contest Client - {}", controller.game()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(heading, title);

    let status = scheduler.status();
    match scheduler.status_message() {
        Some(message) => widgets::draw_status(frame, board, &message, status.is_error()),
        None => {
            controller.draw(frame, board, scheduler.surface(), scheduler.language());
            widgets::draw_indicator(frame, board, scheduler.indicator());
        }
    }

    let hint = if controller.awaits_input() {
        "Your move - click to play, right click to cancel, q to quit"
    } else {
        "q to quit"
    };
    let footer_text = Paragraph::new(format!("{} | {}", status, hint))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer_text, footer);
}
