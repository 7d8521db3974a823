//! The canvas contract turtles draw against, and an in-memory implementation.
//!
//! DESIGN
//! ======
//! A [`Canvas`] is shared by every turtle drawing on it (`Arc<dyn Canvas>`),
//! so all methods take `&self` and implementations serialize access
//! internally. Turtles only ever append commands, replace their own
//! snapshot, and wait on [`Canvas::delay`]; the canvas never calls back
//! into a turtle.
//!
//! [`MemoryCanvas`] keeps everything behind one `std::sync::Mutex` that is
//! never held across an `.await`, so concurrent turtles interleave their
//! commands at method granularity.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::color::Color;
use crate::command::{CommandLog, DrawCommand};
use crate::coords::Surface;
use crate::state::TurtleState;

/// Canvas-unique turtle identifier. Assigned from 0 upward, never reused.
pub type TurtleId = u32;

/// Everything a turtle needs from the surface it draws on.
#[async_trait::async_trait]
pub trait Canvas: Send + Sync {
    /// Current surface width in pixels. May change between calls.
    fn width(&self) -> f64;

    /// Current surface height in pixels. May change between calls.
    fn height(&self) -> f64;

    fn background_color(&self) -> Color;

    fn set_background_color(&self, color: Color);

    /// Append a command to the log.
    fn add_command(&self, command: DrawCommand);

    /// Empty the command log. Turtle snapshots are kept.
    fn clear(&self);

    /// Hint that a redraw should happen soon.
    fn invalidate(&self);

    /// Store `state` under a fresh id and return it.
    fn register_turtle(&self, state: TurtleState) -> TurtleId;

    /// Replace the snapshot for `id`. Unknown ids are ignored.
    fn update_turtle(&self, id: TurtleId, state: TurtleState);

    /// Forget the snapshot for `id`.
    fn remove_turtle(&self, id: TurtleId);

    /// Whether a pacing primitive is installed. Without one, all motion is instant.
    fn animates(&self) -> bool;

    /// Pacing primitive: suspend for `duration_ms`. A no-op when not animating.
    async fn delay(&self, duration_ms: u64);

    /// Whether the canvas is attached to a surface and can accept turtles.
    fn is_ready(&self) -> bool {
        true
    }

    /// Current extents as a [`Surface`].
    fn surface(&self) -> Surface {
        Surface::new(self.width(), self.height())
    }
}

// =============================================================================
// TURTLE REGISTRY
// =============================================================================

/// Map of live turtle snapshots, keyed by id, with the id allocator.
#[derive(Debug, Default)]
pub struct TurtleRegistry {
    turtles: BTreeMap<TurtleId, TurtleState>,
    next_id: TurtleId,
}

impl TurtleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { turtles: BTreeMap::new(), next_id: 0 }
    }

    /// Store `state` under the next id.
    pub fn register(&mut self, state: TurtleState) -> TurtleId {
        let id = self.next_id;
        self.next_id += 1;
        self.turtles.insert(id, state);
        id
    }

    /// Replace the snapshot for `id`. Returns false if `id` is unknown.
    pub fn update(&mut self, id: TurtleId, state: TurtleState) -> bool {
        let Some(slot) = self.turtles.get_mut(&id) else {
            return false;
        };
        *slot = state;
        true
    }

    /// Remove and return the snapshot for `id`.
    pub fn remove(&mut self, id: TurtleId) -> Option<TurtleState> {
        self.turtles.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: TurtleId) -> Option<&TurtleState> {
        self.turtles.get(&id)
    }

    /// Snapshots in id order, for drawing turtle glyphs.
    pub fn iter(&self) -> impl Iterator<Item = (TurtleId, &TurtleState)> {
        self.turtles.iter().map(|(id, state)| (*id, state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turtles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turtles.is_empty()
    }
}

// =============================================================================
// MEMORY CANVAS
// =============================================================================

/// How a [`MemoryCanvas`] implements its pacing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// No pacing primitive: turtles move in a single step and never wait.
    #[default]
    Instant,
    /// Sleep on the tokio timer for each requested delay.
    Realtime,
    /// Record each requested delay and yield without sleeping.
    Recorded,
}

struct Inner {
    surface: Surface,
    ready: bool,
    background: Color,
    log: CommandLog,
    turtles: TurtleRegistry,
    invalidations: u64,
    delays: Vec<u64>,
}

/// Reference [`Canvas`] that keeps the command log and turtle snapshots in memory.
pub struct MemoryCanvas {
    pacing: Pacing,
    inner: Mutex<Inner>,
}

impl MemoryCanvas {
    /// Ready canvas of the given size without pacing.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_pacing(width, height, Pacing::Instant)
    }

    /// Ready canvas of the given size with the given pacing.
    #[must_use]
    pub fn with_pacing(width: f64, height: f64, pacing: Pacing) -> Self {
        Self::build(Surface::new(width, height), true, pacing)
    }

    /// Canvas not yet attached to a surface. Turtles cannot be created on it
    /// until [`MemoryCanvas::attach`] is called.
    #[must_use]
    pub fn unattached(pacing: Pacing) -> Self {
        Self::build(Surface::new(0.0, 0.0), false, pacing)
    }

    fn build(surface: Surface, ready: bool, pacing: Pacing) -> Self {
        Self {
            pacing,
            inner: Mutex::new(Inner {
                surface,
                ready,
                background: Color::WHITE,
                log: CommandLog::new(),
                turtles: TurtleRegistry::new(),
                invalidations: 0,
                delays: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach to a surface of the given size and mark the canvas ready.
    pub fn attach(&self, width: f64, height: f64) {
        let mut inner = self.lock();
        inner.surface = Surface::new(width, height);
        inner.ready = true;
        debug!(width, height, "canvas attached");
    }

    /// Change the surface size. Existing commands and snapshots keep their coordinates.
    pub fn resize(&self, width: f64, height: f64) {
        let mut inner = self.lock();
        inner.surface = Surface::new(width, height);
        inner.invalidations += 1;
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Copy of the command log in emission order.
    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.lock().log.snapshot()
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.lock().log.len()
    }

    /// Latest snapshot registered for `id`.
    #[must_use]
    pub fn turtle(&self, id: TurtleId) -> Option<TurtleState> {
        self.lock().turtles.get(id).copied()
    }

    /// All live snapshots in id order.
    #[must_use]
    pub fn turtles(&self) -> Vec<(TurtleId, TurtleState)> {
        self.lock().turtles.iter().map(|(id, state)| (id, *state)).collect()
    }

    #[must_use]
    pub fn turtle_count(&self) -> usize {
        self.lock().turtles.len()
    }

    /// Number of redraw hints received so far.
    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.lock().invalidations
    }

    /// Delays requested under [`Pacing::Recorded`], in call order.
    #[must_use]
    pub fn recorded_delays(&self) -> Vec<u64> {
        self.lock().delays.clone()
    }
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[async_trait::async_trait]
impl Canvas for MemoryCanvas {
    fn width(&self) -> f64 {
        self.lock().surface.width
    }

    fn height(&self) -> f64 {
        self.lock().surface.height
    }

    fn background_color(&self) -> Color {
        self.lock().background
    }

    fn set_background_color(&self, color: Color) {
        let mut inner = self.lock();
        inner.background = color;
        inner.invalidations += 1;
    }

    fn add_command(&self, command: DrawCommand) {
        self.lock().log.push(command);
    }

    fn clear(&self) {
        let mut inner = self.lock();
        debug!(dropped = inner.log.len(), "command log cleared");
        inner.log.clear();
    }

    fn invalidate(&self) {
        self.lock().invalidations += 1;
    }

    fn register_turtle(&self, state: TurtleState) -> TurtleId {
        let id = self.lock().turtles.register(state);
        debug!(turtle = id, "turtle registered");
        id
    }

    fn update_turtle(&self, id: TurtleId, state: TurtleState) {
        if !self.lock().turtles.update(id, state) {
            warn!(turtle = id, "update for unknown turtle ignored");
        }
    }

    fn remove_turtle(&self, id: TurtleId) {
        if self.lock().turtles.remove(id).is_some() {
            debug!(turtle = id, "turtle removed");
        }
    }

    fn animates(&self) -> bool {
        self.pacing != Pacing::Instant
    }

    async fn delay(&self, duration_ms: u64) {
        match self.pacing {
            Pacing::Instant => {}
            Pacing::Realtime => tokio::time::sleep(Duration::from_millis(duration_ms)).await,
            Pacing::Recorded => {
                self.lock().delays.push(duration_ms);
                tokio::task::yield_now().await;
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn surface(&self) -> Surface {
        self.lock().surface
    }
}
