//! Drawing-surface geometry shared by both boards.

/// Size of the surface a board is laid out on, in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Surface {
    /// Creates a new surface.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface center.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A position on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation towards `other` at `t` in `[0, 1]`.
    pub fn lerp(&self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}
