//! Connect4: a 7x6 column-drop grid.

mod action;
mod board;
mod layout;

pub use action::Column;
pub use board::{Cell, Connect4Board, DROP_DURATION, FallingStone};
pub use layout::{GridLayout, MAGNETISM_RADIUS};

/// Number of columns.
pub const COLUMNS: usize = 7;

/// Number of rows, counted from the bottom.
pub const ROWS: usize = 6;

/// Row index of the drop slot above the grid.
pub const SLOT_ROW: u8 = ROWS as u8;

/// Column above which stones played on the server side appear.
pub const SERVER_DROP_COLUMN: Column = Column::CENTER;
