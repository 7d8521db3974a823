//! Immutable snapshot of one turtle.
//!
//! Every mutator is a `with_*` method returning a new value; the engine keeps
//! exactly one live state and reassigns it after each change.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{DEFAULT_SPEED, MAX_SPEED};
use crate::coords::Point;

/// Position, heading, pen, and appearance of a turtle.
///
/// `position` is in canvas pixel space. `heading` is in degrees, 0 pointing
/// along +x and growing clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    pub position: Point,
    pub heading: f64,
    pub pen_down: bool,
    pub pen_color: Color,
    pub pen_width: f64,
    pub fill_color: Color,
    pub visible: bool,
    /// 0 disables animation; 1 is slowest, 10 fastest.
    pub speed: u8,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Point::default(),
            heading: 0.0,
            pen_down: true,
            pen_color: Color::BLACK,
            pen_width: 1.0,
            fill_color: Color::BLACK,
            visible: true,
            speed: DEFAULT_SPEED,
        }
    }
}

impl TurtleState {
    /// Default state placed at `position`.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self { position, ..Self::default() }
    }

    #[must_use]
    pub fn with_position(self, position: Point) -> Self {
        Self { position, ..self }
    }

    /// Heading is stored as given; callers normalize.
    #[must_use]
    pub fn with_heading(self, heading: f64) -> Self {
        Self { heading, ..self }
    }

    #[must_use]
    pub fn with_pen_down(self, pen_down: bool) -> Self {
        Self { pen_down, ..self }
    }

    #[must_use]
    pub fn with_pen_color(self, pen_color: Color) -> Self {
        Self { pen_color, ..self }
    }

    #[must_use]
    pub fn with_pen_width(self, pen_width: f64) -> Self {
        Self { pen_width, ..self }
    }

    #[must_use]
    pub fn with_fill_color(self, fill_color: Color) -> Self {
        Self { fill_color, ..self }
    }

    #[must_use]
    pub fn with_visible(self, visible: bool) -> Self {
        Self { visible, ..self }
    }

    /// Speed clamped to `0..=MAX_SPEED`.
    #[must_use]
    pub fn with_speed(self, speed: u8) -> Self {
        Self { speed: speed.min(MAX_SPEED), ..self }
    }
}
