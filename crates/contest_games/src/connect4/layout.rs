//! Screen layout of the Connect4 grid.

use crate::{Point, Surface};

use super::{Column, SLOT_ROW};

/// Pointer distance, in cell units, under which a column's slot attracts the stone.
pub const MAGNETISM_RADIUS: f32 = 0.5;

/// Grid geometry for a given surface.
///
/// The six grid rows plus the drop slot row are laid out as seven square
/// cells centred on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    surface: Surface,
    cell: f32,
}

impl GridLayout {
    /// Sizes the grid to fit `surface`.
    pub fn for_surface(surface: Surface) -> Self {
        let cell = (surface.width * 0.8 / 7.0).min(surface.height * 0.8 / 7.0);
        Self { surface, cell }
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f32 {
        self.cell
    }

    /// Center of the hole at `column`, `row` (row 0 is the bottom, row 6 the slot).
    pub fn hole_center(&self, column: Column, row: u8) -> Point {
        let center = self.surface.center();
        Point::new(
            center.x + self.cell * (column.index() as f32 - 3.0),
            center.y + self.cell * (3.0 - row as f32),
        )
    }

    /// Center of the drop slot above `column`.
    pub fn slot_center(&self, column: Column) -> Point {
        self.hole_center(column, SLOT_ROW)
    }

    /// First of `columns` whose slot lies within the magnetism radius of `pointer`.
    pub fn magnetic_column(&self, pointer: Point, columns: &[Column]) -> Option<Column> {
        columns.iter().copied().find(|&column| {
            let d_unit = pointer.distance(self.slot_center(column)) / self.cell;
            d_unit <= MAGNETISM_RADIUS
        })
    }
}
