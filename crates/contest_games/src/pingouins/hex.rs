//! Staggered hex-grid coordinates and stepping.
//!
//! Odd rows are shifted half a tile to the right, so the horizontal offset
//! of a diagonal step depends on the parity of the row being left.

use strum::IntoEnumIterator;

use super::BOARD_SIZE;

const STEP_X_EVEN: [i32; 6] = [-1, -1, 0, 1, 0, -1];
const STEP_X_ODD: [i32; 6] = [-1, 0, 1, 1, 1, 0];
const STEP_Y: [i32; 6] = [0, 1, 1, 0, -1, -1];

/// Tile coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl HexCoord {
    /// Creates a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when the coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.x) && (0..BOARD_SIZE as i32).contains(&self.y)
    }

    /// True on a shifted (odd) row.
    pub fn is_odd_row(&self) -> bool {
        self.y.rem_euclid(2) == 1
    }

    /// The neighbouring tile in `direction`.
    pub fn step(self, direction: Direction) -> HexCoord {
        let d = direction.index();
        let dx = if self.is_odd_row() {
            STEP_X_ODD[d]
        } else {
            STEP_X_EVEN[d]
        };
        HexCoord::new(self.x + dx, self.y + STEP_Y[d])
    }

    /// All board tiles in row-major order.
    pub fn all() -> impl Iterator<Item = HexCoord> {
        (0..BOARD_SIZE as i32)
            .flat_map(|y| (0..BOARD_SIZE as i32).map(move |x| HexCoord::new(x, y)))
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The six movement directions, in wire order 0..5.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Direction {
    /// Left.
    #[strum(serialize = "LL")]
    Left,
    /// Top left.
    #[strum(serialize = "TL")]
    TopLeft,
    /// Top right.
    #[strum(serialize = "TR")]
    TopRight,
    /// Right.
    #[strum(serialize = "RR")]
    Right,
    /// Bottom right.
    #[strum(serialize = "BR")]
    BottomRight,
    /// Bottom left.
    #[strum(serialize = "BL")]
    BottomLeft,
}

impl Direction {
    /// Wire index 0..5.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for a wire index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }
}

/// Tile reached from `from` after `steps` unit steps in `direction`.
///
/// Pure and deterministic: both the destination candidates shown to the
/// player and the animation of server-side moves go through here.
pub fn compute_dest_tile(from: HexCoord, direction: Direction, steps: u32) -> HexCoord {
    (0..steps).fold(from, |coord, _| coord.step(direction))
}
