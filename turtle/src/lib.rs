//! Turtle motion and command-generation engine.
//!
//! A [`turtle::Turtle`] owns one pen-carrying agent. Every motion request
//! (forward, turn, go-to, circle) is decomposed into discrete timed steps;
//! each step commits a new [`state::TurtleState`], emits immutable
//! [`command::DrawCommand`]s into the shared [`canvas::Canvas`], hints a
//! redraw, and suspends on the canvas's pacing primitive. The canvas and
//! whatever renders it are passive: they only receive commands and
//! snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`turtle`] | The turtle engine: stepping, timing, fills, cancellation |
//! | [`canvas`] | The canvas contract and the in-memory [`canvas::MemoryCanvas`] |
//! | [`state`] | Immutable per-turtle snapshot |
//! | [`command`] | Draw command model and the append-only command log |
//! | [`coords`] | Points and logical/pixel coordinate conversion |
//! | [`color`] | RGBA color value, presets, and hex parsing |
//! | [`consts`] | Step sizes and timing-law constants |

pub mod canvas;
pub mod color;
pub mod command;
pub mod consts;
pub mod coords;
pub mod state;
pub mod turtle;

pub use canvas::{Canvas, MemoryCanvas, Pacing, TurtleId};
pub use color::{Color, ColorError};
pub use command::{DrawCommand, TextAlign};
pub use coords::{Point, Surface};
pub use state::TurtleState;
pub use turtle::{CancelHandle, Turtle, TurtleError};
