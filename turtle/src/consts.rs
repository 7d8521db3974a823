//! Shared numeric constants for the turtle crate.

// ── Speed ───────────────────────────────────────────────────────

/// Speed given to a freshly constructed turtle and to `TurtleState::default()`.
pub const DEFAULT_SPEED: u8 = 5;

/// Fastest animated speed. Speed 0 disables animation entirely.
pub const MAX_SPEED: u8 = 10;

/// Per-step delay is `STEP_DELAY_BASE_MS - speed * STEP_DELAY_PER_SPEED_MS`.
pub const STEP_DELAY_BASE_MS: u64 = 105;

/// Milliseconds shaved off the step delay per speed level.
pub const STEP_DELAY_PER_SPEED_MS: u64 = 10;

// ── Stepping ────────────────────────────────────────────────────

/// Pixels covered by one animated step of a straight move.
pub const MOVE_STEP_PX: f64 = 5.0;

/// Degrees covered by one animated step of a turn.
pub const TURN_STEP_DEG: f64 = 10.0;

/// Degrees of arc per polygon segment when `circle` picks its own step count.
pub const CIRCLE_SEGMENT_DEG: f64 = 5.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Length from the turtle's position to each vertex of a stamped triangle.
pub const STAMP_SIZE: f64 = 10.0;

/// Angle between the heading and each back vertex of a stamped triangle.
pub const STAMP_BACK_ANGLE_DEG: f64 = 140.0;

/// Font family used by `write` when none is given.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Font size used by `write` when none is given.
pub const DEFAULT_FONT_SIZE: f64 = 8.0;

/// Minimum number of boundary points for `end_fill` to emit a polygon.
pub const MIN_FILL_POINTS: usize = 3;
