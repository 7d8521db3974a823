//! The turtle engine.
//!
//! DESIGN
//! ======
//! A [`Turtle`] owns exactly one live [`TurtleState`]. Continuous motion
//! (`forward`, `right`, `go_to`, `circle_arc`) is split into steps; each
//! step computes the next state, emits its draw commands, commits the state
//! to the canvas as this turtle's snapshot, hints a redraw, and then waits
//! on the canvas pacing primitive for [`Turtle::effective_step_delay`].
//! Steps of one call never overlap. Different turtles share nothing but the
//! canvas, so they can be driven concurrently and their commands interleave
//! in the log.
//!
//! TIMING
//! ======
//! Without a pacing primitive, or at speed 0, every motion is a single step
//! with no suspension. Otherwise a move takes one step per 5 px and a turn
//! one step per 10°, each followed by a wait of `105 - speed * 10` ms.
//!
//! Numeric inputs are not validated: NaN and extreme values flow through the
//! arithmetic unchanged.

#[cfg(test)]
#[path = "turtle_test.rs"]
mod turtle_test;

use std::f64::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::canvas::{Canvas, TurtleId};
use crate::color::Color;
use crate::command::{DrawCommand, TextAlign};
use crate::consts::{
    CIRCLE_SEGMENT_DEG, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MAX_SPEED, MIN_FILL_POINTS, MOVE_STEP_PX,
    STAMP_BACK_ANGLE_DEG, STAMP_SIZE, STEP_DELAY_BASE_MS, STEP_DELAY_PER_SPEED_MS, TURN_STEP_DEG,
};
use crate::coords::Point;
use crate::state::TurtleState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurtleError {
    /// The canvas has no surface yet, so there is no center to start from.
    #[error("canvas is not ready")]
    CanvasNotReady,
}

/// Stops a turtle's stepped motions between steps.
///
/// Clones share one flag. While cancelled, every stepped motion of the
/// owning turtle returns before its next step, leaving the state at the
/// last committed step.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Allow motion again after [`CancelHandle::cancel`].
    pub fn resume(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Delay in milliseconds between animated steps at `speed`. Speed 0 means
/// no animation and yields 0; speeds above the maximum are clamped.
#[must_use]
pub fn step_delay(speed: u8) -> u64 {
    if speed == 0 {
        return 0;
    }
    STEP_DELAY_BASE_MS - u64::from(speed.min(MAX_SPEED)) * STEP_DELAY_PER_SPEED_MS
}

/// One animated pen-carrying agent drawing on a shared canvas.
pub struct Turtle {
    canvas: Arc<dyn Canvas>,
    id: TurtleId,
    state: TurtleState,
    fill: Option<Vec<Point>>,
    cancel: CancelHandle,
}

impl Turtle {
    /// Create a turtle at the canvas center, heading east, and register it.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::CanvasNotReady`] if the canvas is not attached
    /// to a surface yet.
    pub fn new(canvas: Arc<dyn Canvas>) -> Result<Self, TurtleError> {
        if !canvas.is_ready() {
            return Err(TurtleError::CanvasNotReady);
        }
        let start = TurtleState::at(canvas.surface().center());
        Self::with_state(canvas, start)
    }

    /// Create a turtle with an explicit initial state (pixel space) and register it.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::CanvasNotReady`] if the canvas is not attached
    /// to a surface yet.
    pub fn with_state(canvas: Arc<dyn Canvas>, state: TurtleState) -> Result<Self, TurtleError> {
        if !canvas.is_ready() {
            return Err(TurtleError::CanvasNotReady);
        }
        let id = canvas.register_turtle(state);
        debug!(turtle = id, x = state.position.x, y = state.position.y, "turtle created");
        Ok(Self { canvas, id, state, fill: None, cancel: CancelHandle::default() })
    }

    // --- Timing ---

    /// Whether motions are split into paced steps.
    #[must_use]
    pub fn animated(&self) -> bool {
        self.canvas.animates() && self.state.speed > 0
    }

    /// Delay after each step, in the canvas time unit. 0 when not animated.
    #[must_use]
    pub fn effective_step_delay(&self) -> u64 {
        if !self.canvas.animates() {
            return 0;
        }
        step_delay(self.state.speed)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn step_count(&self, magnitude: f64, per_step: f64) -> usize {
        if !self.animated() {
            return 1;
        }
        ((magnitude.abs() / per_step).floor() as usize).max(1)
    }

    // --- Stepped motion ---

    /// Move `distance` pixels along the heading. Negative moves backward.
    #[allow(clippy::cast_precision_loss)]
    pub async fn forward(&mut self, distance: f64) {
        let steps = self.step_count(distance, MOVE_STEP_PX);
        let step_distance = distance / steps as f64;
        debug!(turtle = self.id, distance, steps, "forward");

        for i in 1..=steps {
            if self.cancel.is_cancelled() {
                debug!(turtle = self.id, step = i, "forward cancelled");
                return;
            }
            let from = self.state.position;
            let to = from.advance(self.state.heading, step_distance);
            self.draw_segment(from, to);
            if i == steps {
                self.record_fill_point(to);
            }
            self.step(self.state.with_position(to)).await;
        }
    }

    pub async fn backward(&mut self, distance: f64) {
        self.forward(-distance).await;
    }

    /// Turn clockwise on screen by `angle` degrees. Negative turns counter-clockwise.
    #[allow(clippy::cast_precision_loss)]
    pub async fn right(&mut self, angle: f64) {
        let steps = self.step_count(angle, TURN_STEP_DEG);
        let step_angle = angle / steps as f64;
        debug!(turtle = self.id, angle, steps, "turn");

        for i in 1..=steps {
            if self.cancel.is_cancelled() {
                debug!(turtle = self.id, step = i, "turn cancelled");
                return;
            }
            let heading = (self.state.heading + step_angle).rem_euclid(360.0);
            self.step(self.state.with_heading(heading)).await;
        }
    }

    pub async fn left(&mut self, angle: f64) {
        self.right(-angle).await;
    }

    /// Move in a straight line to a logical point (origin at canvas center, y up).
    #[allow(clippy::cast_precision_loss)]
    pub async fn go_to(&mut self, x: f64, y: f64) {
        let start = self.state.position;
        let target = self.canvas.surface().logical_to_pixel(Point::new(x, y));
        let steps = self.step_count(start.distance_to(target), MOVE_STEP_PX);
        debug!(turtle = self.id, x, y, steps, "go_to");

        for i in 1..=steps {
            if self.cancel.is_cancelled() {
                debug!(turtle = self.id, step = i, "go_to cancelled");
                return;
            }
            let from = self.state.position;
            let to = if i == steps { target } else { start.lerp(target, i as f64 / steps as f64) };
            self.draw_segment(from, to);
            if i == steps {
                self.record_fill_point(to);
            }
            self.step(self.state.with_position(to)).await;
        }
    }

    /// Move horizontally to logical `x`, keeping the logical y coordinate.
    pub async fn set_x(&mut self, x: f64) {
        let y = self.ycor();
        self.go_to(x, y).await;
    }

    /// Move vertically to logical `y`, keeping the logical x coordinate.
    pub async fn set_y(&mut self, y: f64) {
        let x = self.xcor();
        self.go_to(x, y).await;
    }

    /// Turn to an absolute heading along the shorter arc.
    pub async fn set_heading(&mut self, angle: f64) {
        let delta = (angle - self.state.heading + 540.0).rem_euclid(360.0) - 180.0;
        self.right(delta).await;
    }

    /// Go to the logical origin, then face east.
    pub async fn home(&mut self) {
        self.go_to(0.0, 0.0).await;
        self.set_heading(0.0).await;
    }

    /// Full circle of `radius`. Positive radius winds counter-clockwise on
    /// screen (turning left), negative winds clockwise.
    pub async fn circle(&mut self, radius: f64) {
        self.circle_arc(radius, 360.0, None).await;
    }

    /// Arc of `extent` degrees approximated by `steps` chords.
    ///
    /// `steps` defaults to one chord per 5° of extent. The sign of `radius`
    /// alone picks the turn direction; `extent` contributes only its magnitude.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub async fn circle_arc(&mut self, radius: f64, extent: f64, steps: Option<usize>) {
        let steps = steps
            .unwrap_or_else(|| (extent.abs() / CIRCLE_SEGMENT_DEG).round() as usize)
            .max(1);
        let turn = (extent / steps as f64).abs();
        let segment = 2.0 * PI * radius.abs() * extent.abs() / 360.0 / steps as f64;
        debug!(turtle = self.id, radius, extent, steps, "circle");

        for _ in 0..steps {
            if self.cancel.is_cancelled() {
                return;
            }
            self.forward(segment).await;
            if radius > 0.0 {
                self.left(turn).await;
            } else {
                self.right(turn).await;
            }
        }
    }

    // --- Immediate drawing ---

    /// Stamp a dot at the current position. Size defaults to
    /// `max(pen_width + 4, pen_width * 2)`, color to the pen color.
    pub fn dot(&mut self, size: Option<f64>, color: Option<Color>) {
        let width = self.state.pen_width;
        let size = size.unwrap_or_else(|| (width + 4.0).max(width * 2.0));
        let color = color.unwrap_or(self.state.pen_color);
        self.canvas.add_command(DrawCommand::Dot { at: self.state.position, size, color });
        self.canvas.invalidate();
    }

    /// Leave a triangular outline of the turtle at its current pose.
    pub fn stamp(&mut self) {
        let pos = self.state.position;
        let heading = self.state.heading;
        let tip = pos.advance(heading, STAMP_SIZE);
        let port = pos.advance(heading + STAMP_BACK_ANGLE_DEG, STAMP_SIZE);
        let starboard = pos.advance(heading - STAMP_BACK_ANGLE_DEG, STAMP_SIZE);

        let color = self.state.pen_color;
        let thickness = self.state.pen_width;
        for (from, to) in [(tip, port), (port, starboard), (starboard, tip)] {
            self.canvas.add_command(DrawCommand::Line { from, to, color, thickness });
        }
        self.canvas.invalidate();
    }

    /// Write `text` at the current position in the pen color with the default font.
    pub fn write(&mut self, text: impl Into<String>, align: TextAlign) {
        self.write_with_font(text, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, align);
    }

    pub fn write_with_font(&mut self, text: impl Into<String>, font_family: &str, font_size: f64, align: TextAlign) {
        self.canvas.add_command(DrawCommand::Text {
            at: self.state.position,
            text: text.into(),
            font_family: font_family.to_string(),
            font_size,
            color: self.state.pen_color,
            align,
        });
        self.canvas.invalidate();
    }

    // --- Fill ---

    /// Start collecting fill boundary points at the current position.
    /// Restarts collection if a fill is already in progress.
    pub fn begin_fill(&mut self) -> &mut Self {
        self.fill = Some(vec![self.state.position]);
        self
    }

    /// Emit the collected polygon in the fill color. Fewer than three
    /// points emit nothing. Collection ends either way.
    pub fn end_fill(&mut self) -> &mut Self {
        let Some(points) = self.fill.take() else {
            return self;
        };
        if points.len() < MIN_FILL_POINTS {
            debug!(turtle = self.id, points = points.len(), "fill discarded");
            return self;
        }
        debug!(turtle = self.id, points = points.len(), "fill emitted");
        self.canvas.add_command(DrawCommand::FillEnd { points, color: self.state.fill_color });
        self.canvas.invalidate();
        self
    }

    #[must_use]
    pub fn is_filling(&self) -> bool {
        self.fill.is_some()
    }

    // --- Pen and appearance ---

    pub fn pen_up(&mut self) -> &mut Self {
        self.apply(self.state.with_pen_down(false))
    }

    pub fn pen_down(&mut self) -> &mut Self {
        self.apply(self.state.with_pen_down(true))
    }

    pub fn pen_color(&mut self, color: Color) -> &mut Self {
        self.apply(self.state.with_pen_color(color))
    }

    pub fn pen_size(&mut self, width: f64) -> &mut Self {
        self.apply(self.state.with_pen_width(width))
    }

    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.apply(self.state.with_fill_color(color))
    }

    /// Set pen and fill color together.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.apply(self.state.with_pen_color(color).with_fill_color(color))
    }

    /// Set the animation speed, clamped to `0..=10`. 0 disables animation.
    pub fn speed(&mut self, speed: u8) -> &mut Self {
        self.apply(self.state.with_speed(speed))
    }

    pub fn show_turtle(&mut self) -> &mut Self {
        self.apply(self.state.with_visible(true))
    }

    pub fn hide_turtle(&mut self) -> &mut Self {
        self.apply(self.state.with_visible(false))
    }

    pub fn set_background(&mut self, color: Color) -> &mut Self {
        self.canvas.set_background_color(color);
        self
    }

    // --- Reset / clear ---

    /// Clear the canvas log and return to the center facing east with
    /// default pen settings. Speed is kept; any fill in progress is dropped.
    pub fn reset(&mut self) -> &mut Self {
        self.canvas.clear();
        self.fill = None;
        let fresh = TurtleState::at(self.canvas.surface().center()).with_speed(self.state.speed);
        debug!(turtle = self.id, "reset");
        self.apply(fresh)
    }

    /// Clear the canvas log. The turtle's own state is untouched.
    pub fn clear(&mut self) -> &mut Self {
        self.canvas.clear();
        self.canvas.invalidate();
        self
    }

    /// Unregister from the canvas. The id is not reused.
    pub fn remove(self) {
        self.canvas.remove_turtle(self.id);
        self.canvas.invalidate();
    }

    // --- Cancellation ---

    /// Handle that stops this turtle's stepped motions between steps.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> TurtleId {
        self.id
    }

    /// Current snapshot (pixel space).
    #[must_use]
    pub fn state(&self) -> TurtleState {
        self.state
    }

    /// Logical position: origin at canvas center, y up.
    #[must_use]
    pub fn position(&self) -> Point {
        self.canvas.surface().pixel_to_logical(self.state.position)
    }

    #[must_use]
    pub fn xcor(&self) -> f64 {
        self.position().x
    }

    #[must_use]
    pub fn ycor(&self) -> f64 {
        self.position().y
    }

    #[must_use]
    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.state.pen_down
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    #[must_use]
    pub fn speed_value(&self) -> u8 {
        self.state.speed
    }

    /// Distance to a logical point.
    #[must_use]
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        self.position().distance_to(Point::new(x, y))
    }

    /// Heading that would point at a logical point, in `[0, 360)`.
    #[must_use]
    pub fn towards(&self, x: f64, y: f64) -> f64 {
        let target = self.canvas.surface().logical_to_pixel(Point::new(x, y));
        let pos = self.state.position;
        (target.y - pos.y).atan2(target.x - pos.x).to_degrees().rem_euclid(360.0)
    }

    // --- Internals ---

    fn draw_segment(&self, from: Point, to: Point) {
        if self.state.pen_down {
            self.canvas.add_command(DrawCommand::Line {
                from,
                to,
                color: self.state.pen_color,
                thickness: self.state.pen_width,
            });
        }
    }

    fn record_fill_point(&mut self, point: Point) {
        if let Some(points) = self.fill.as_mut() {
            points.push(point);
        }
    }

    /// Replace the live state and publish it as this turtle's snapshot.
    fn apply(&mut self, state: TurtleState) -> &mut Self {
        self.state = state;
        self.canvas.update_turtle(self.id, state);
        self.canvas.invalidate();
        self
    }

    /// Commit one step, then wait out the step delay.
    async fn step(&mut self, state: TurtleState) {
        self.apply(state);
        trace!(turtle = self.id, x = state.position.x, y = state.position.y, heading = state.heading, "step");
        let delay = self.effective_step_delay();
        if delay > 0 {
            self.canvas.delay(delay).await;
        }
    }
}
