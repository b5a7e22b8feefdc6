//! Screen layout and hit testing of hex tiles.

use crate::{Point, Surface};

use super::{BOARD_SIZE, HexCoord};

/// Hex grid geometry for a given surface.
///
/// Tiles are pointy-top hexagons; rows overlap by a quarter of a tile
/// height and odd rows are shifted half a tile to the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    surface: Surface,
    cell_w: f32,
    cell_h: f32,
}

impl HexLayout {
    /// Sizes the grid to fit `surface`.
    pub fn for_surface(surface: Surface) -> Self {
        let n = BOARD_SIZE as f32;
        let cell_w = (surface.width * 0.8 / n).min(surface.height * 0.9 / n);
        let cell_h = cell_w / (0.5 * 3f32.sqrt());
        Self {
            surface,
            cell_w,
            cell_h,
        }
    }

    /// Tile width.
    pub fn cell_width(&self) -> f32 {
        self.cell_w
    }

    /// Tile height, vertex to vertex.
    pub fn cell_height(&self) -> f32 {
        self.cell_h
    }

    /// On-surface center of a tile.
    pub fn tile_center(&self, coord: HexCoord) -> Point {
        let center = self.surface.center();
        let mut x = center.x + self.cell_w * (coord.x as f32 - 3.5);
        let y = center.y + 0.75 * self.cell_h * (coord.y as f32 - 3.5);
        if coord.is_odd_row() {
            x += self.cell_w / 2.0;
        }
        Point::new(x, y)
    }

    /// True when `point` falls inside the hexagon centred on `center`.
    pub fn tile_contains(&self, center: Point, point: Point) -> bool {
        let half_w = self.cell_w / 2.0;
        let edge = self.cell_h / 2.0;
        let dx = (point.x - center.x).abs();
        let dy = (point.y - center.y).abs();

        // Bounding box
        if dy > edge || dx > half_w {
            return false;
        }

        // Rectangle between the slanted edges
        if dy < edge / 2.0 {
            return true;
        }

        // Top and bottom triangles
        let dy = dy - edge / 2.0;
        dy <= 0.5 * edge * (half_w - dx) / half_w
    }

    /// First of `candidates` whose hexagon contains `point`.
    pub fn tile_at(
        &self,
        point: Point,
        candidates: impl IntoIterator<Item = HexCoord>,
    ) -> Option<HexCoord> {
        candidates
            .into_iter()
            .find(|&coord| self.tile_contains(self.tile_center(coord), point))
    }
}
