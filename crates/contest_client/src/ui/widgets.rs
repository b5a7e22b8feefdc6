//! Surface mapping and small drawing helpers shared by both boards.

use contest_games::{Point, Surface};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use crate::think::HIDDEN_HEIGHT;
use crate::{PointerButton, PointerEvent, ThinkIndicator};

/// Surface units per terminal row; terminal cells are about twice as tall as wide.
const ROW_UNITS: f32 = 2.0;

/// Board surface covering `area`.
pub fn surface_for(area: Rect) -> Surface {
    Surface::new(area.width as f32, area.height as f32 * ROW_UNITS)
}

/// Surface point at the middle of a terminal cell, if it lies in `area`.
pub fn point_at(area: Rect, column: u16, row: u16) -> Option<Point> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    inside.then(|| {
        Point::new(
            (column - area.x) as f32 + 0.5,
            ((row - area.y) as f32 + 0.5) * ROW_UNITS,
        )
    })
}

/// Terminal cell holding a surface point, if it lies in `area`.
pub fn cell_at(area: Rect, point: Point) -> Option<(u16, u16)> {
    let x = point.x.floor();
    let y = (point.y / ROW_UNITS).floor();
    if x < 0.0 || y < 0.0 || x >= area.width as f32 || y >= area.height as f32 {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}

/// Translates a terminal mouse event over `area` into a pointer event.
pub fn pointer_event(mouse: MouseEvent, area: Rect) -> Option<PointerEvent> {
    let at = point_at(area, mouse.column, mouse.row)?;
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::MouseMoved(at)),
        MouseEventKind::Down(button) => {
            let button = match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => PointerButton::Middle,
            };
            Some(PointerEvent::MouseDown { at, button })
        }
        MouseEventKind::Up(_) => Some(PointerEvent::MouseUp(at)),
        _ => None,
    }
}

/// Writes `text` centred on a surface point, clipped to `area`.
pub fn put_centered(buf: &mut Buffer, area: Rect, point: Point, text: &str, style: Style) {
    let half = text.chars().count() as f32 / 2.0;
    let start = Point::new(point.x - half + 0.5, point.y);
    for (i, ch) in text.chars().enumerate() {
        let at = Point::new(start.x + i as f32, start.y);
        if let Some((x, y)) = cell_at(area, at) {
            buf.set_string(x, y, ch.to_string(), style);
        }
    }
}

/// Rectangle of the given size centred in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height.min(area.height)),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width.min(area.width)),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

/// Centred message replacing the board.
pub fn draw_status(frame: &mut Frame, area: Rect, message: &str, is_error: bool) {
    let color = if is_error { Color::Red } else { Color::White };
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, center_rect(area, width, 3));
}

/// Winner or draw banner across the middle of the board.
pub fn draw_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let rect = center_rect(area, area.width.saturating_sub(4), 3);
    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(Style::default().bg(color)));
    frame.render_widget(paragraph, rect);
}

/// The thinking gauge, rising from the bottom-left corner.
pub fn draw_indicator(frame: &mut Frame, area: Rect, indicator: &ThinkIndicator) {
    const ROWS: f32 = 3.0;
    let shown = (indicator.height() - HIDDEN_HEIGHT) / -HIDDEN_HEIGHT;
    let lift = (shown * ROWS).round();
    if lift < 1.0 {
        return;
    }
    let lift = (lift as u16).min(area.height);
    let rect = Rect {
        x: area.x,
        y: area.y + area.height - lift,
        width: 24.min(area.width),
        height: lift.min(ROWS as u16),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Thinking"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(indicator.progress().clamp(0.0, 1.0) as f64);
    frame.render_widget(Clear, rect);
    frame.render_widget(gauge, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_and_point_mapping_agree() {
        let area = Rect::new(2, 3, 40, 20);
        for (column, row) in [(2, 3), (10, 7), (41, 22)] {
            let point = point_at(area, column, row).unwrap();
            assert_eq!(cell_at(area, point), Some((column, row)));
        }
        assert_eq!(point_at(area, 1, 3), None);
        assert_eq!(point_at(area, 42, 3), None);
    }

    #[test]
    fn test_surface_doubles_rows() {
        let surface = surface_for(Rect::new(0, 0, 80, 20));
        assert_eq!(surface.width, 80.0);
        assert_eq!(surface.height, 40.0);
    }
}
