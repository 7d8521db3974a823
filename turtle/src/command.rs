//! Draw command model and the append-only command log.
//!
//! Turtles resolve every coordinate to absolute pixel space before emitting a
//! [`DrawCommand`], so the log is a flat, replayable trace with no reference
//! back to the turtle that produced each entry. Renderers read the log via
//! [`CommandLog::iter`]; the only mutation besides appending is
//! [`CommandLog::clear`].

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::coords::Point;

/// Horizontal alignment of a text command relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One immutable drawing instruction in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Straight stroke between two points.
    Line { from: Point, to: Point, color: Color, thickness: f64 },
    /// Filled round dot of diameter `size`.
    Dot { at: Point, size: f64, color: Color },
    /// Stroked arc; a full circle when `sweep_angle` is 360.
    CircleOutline {
        center: Point,
        radius: f64,
        color: Color,
        thickness: f64,
        start_angle: f64,
        sweep_angle: f64,
    },
    /// Solid disc.
    FilledCircle { center: Point, radius: f64, color: Color },
    /// Text anchored at `at`.
    Text { at: Point, text: String, font_family: String, font_size: f64, color: Color, align: TextAlign },
    /// Marks the start of a filled region.
    FillBegin { color: Color },
    /// Closed polygon to fill, in boundary order.
    FillEnd { points: Vec<Point>, color: Color },
}

impl DrawCommand {
    /// Full-circle outline (`start_angle` 0, `sweep_angle` 360).
    #[must_use]
    pub fn circle_outline(center: Point, radius: f64, color: Color, thickness: f64) -> Self {
        Self::CircleOutline { center, radius, color, thickness, start_angle: 0.0, sweep_angle: 360.0 }
    }

    /// Whether this is a `Line`.
    #[must_use]
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }
}

/// Ordered, append-only sequence of draw commands.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Vec<DrawCommand>,
}

impl CommandLog {
    #[must_use]
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Append a command. No validation.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Drop every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Owned copy of the log, for handing to a renderer outside the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DrawCommand> {
        self.commands.clone()
    }
}
