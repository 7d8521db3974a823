#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

/// A point in either logical or pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point { x: self.x + (other.x - self.x) * t, y: self.y + (other.y - self.y) * t }
    }

    /// Advance `distance` along `heading_deg` (0 = +x, clockwise with y down).
    #[must_use]
    pub fn advance(self, heading_deg: f64, distance: f64) -> Point {
        let (sin, cos) = heading_deg.to_radians().sin_cos();
        Point { x: self.x + distance * cos, y: self.y + distance * sin }
    }
}

/// Drawing-surface extents and the logical/pixel conversion.
///
/// Pixel space has its origin top-left with y growing downward. Logical space
/// has its origin at the surface center with y growing upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel position of the surface center (logical origin).
    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.width / 2.0, y: self.height / 2.0 }
    }

    /// Convert a logical point to pixel coordinates.
    #[must_use]
    pub fn logical_to_pixel(&self, logical: Point) -> Point {
        Point { x: self.width / 2.0 + logical.x, y: self.height / 2.0 - logical.y }
    }

    /// Convert a pixel point to logical coordinates.
    #[must_use]
    pub fn pixel_to_logical(&self, pixel: Point) -> Point {
        Point { x: pixel.x - self.width / 2.0, y: self.height / 2.0 - pixel.y }
    }
}
