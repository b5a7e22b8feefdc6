//! Connect4 grid state and falling-stone animation.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{Animation, AnimationKind};

use super::{COLUMNS, Column, ROWS};

/// Time for a stone to travel from its slot to its landing hole.
pub const DROP_DURATION: Duration = Duration::from_millis(600);

/// A grid hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// No stone.
    #[default]
    Empty,
    /// Stone of the given player number.
    Stone(u32),
}

/// A stone on its way into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingStone {
    /// Owning player number.
    pub player: u32,
    /// Slot the stone starts above.
    pub from: Column,
    /// Column it lands in.
    pub column: Column,
    /// Row it lands on.
    pub row: u8,
}

/// The 7x6 grid plus stones still falling into it.
#[derive(Debug, Clone, Default)]
pub struct Connect4Board {
    grid: [[Cell; COLUMNS]; ROWS],
    falling: Vec<Animation<FallingStone>>,
}

impl Connect4Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hole content at `column`, `row` (row 0 is the bottom).
    pub fn cell(&self, column: Column, row: u8) -> Cell {
        self.grid
            .get(row as usize)
            .map(|cells| cells[column.index() as usize])
            .unwrap_or_default()
    }

    /// Lowest free row of `column`, counting stones still falling into it.
    pub fn landing_row(&self, column: Column) -> Option<u8> {
        let settled = (0..ROWS as u8)
            .filter(|&row| self.cell(column, row) != Cell::Empty)
            .count();
        let in_flight = self
            .falling
            .iter()
            .filter(|anim| anim.target().column == column)
            .count();
        let row = settled + in_flight;
        (row < ROWS).then_some(row as u8)
    }

    /// Starts dropping a stone from the slot above `from` into `column`.
    ///
    /// Returns the landing row, or `None` when the column is full.
    pub fn drop_stone(&mut self, from: Column, column: Column, player: u32) -> Option<u8> {
        let Some(row) = self.landing_row(column) else {
            warn!(%column, player, "Column is full, ignoring drop");
            return None;
        };
        debug!(%from, %column, row, player, "Dropping stone");
        let stone = FallingStone {
            player,
            from,
            column,
            row,
        };
        self.falling
            .push(Animation::new(AnimationKind::Move, stone, DROP_DURATION));
        Some(row)
    }

    /// Advances falling stones, settling the ones that arrived.
    pub fn update(&mut self, dt: Duration) {
        let mut still_falling = Vec::with_capacity(self.falling.len());
        for mut anim in self.falling.drain(..) {
            if anim.advance(dt) {
                let stone = anim.into_target();
                self.grid[stone.row as usize][stone.column.index() as usize] =
                    Cell::Stone(stone.player);
            } else {
                still_falling.push(anim);
            }
        }
        self.falling = still_falling;
    }

    /// True while any stone is falling.
    pub fn is_busy(&self) -> bool {
        !self.falling.is_empty()
    }

    /// Stones currently falling.
    pub fn falling(&self) -> &[Animation<FallingStone>] {
        &self.falling
    }

    /// True when no column can take another stone.
    pub fn is_full(&self) -> bool {
        Column::all().all(|column| self.landing_row(column).is_none())
    }
}
