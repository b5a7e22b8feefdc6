//! Pingouins: penguins hopping across an 8x8 staggered hex grid of ice tiles.
//!
//! A move picks a penguin, one of six directions and a number of steps.
//! The start tile dissolves once the penguin leaves it.

mod action;
mod board;
mod hex;
mod layout;
mod penguin;
mod state;

pub use action::HexMove;
pub use board::{DISSOLVE_DURATION, IceBoard};
pub use hex::{Direction, HexCoord, compute_dest_tile};
pub use layout::HexLayout;
pub use penguin::{MOVE_DURATION, Penguin, Team};
pub use state::{PenguinPlacement, PingouinsState};

/// Tiles per row and rows per board.
pub const BOARD_SIZE: usize = 8;

/// Highest fish count a tile can carry.
pub const MAX_FISH: u8 = 3;

/// Fish count per tile, indexed `[y][x]`.
pub type FishGrid = [[u8; BOARD_SIZE]; BOARD_SIZE];
