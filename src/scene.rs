//! Demo scenes driven against a shared canvas.
//!
//! Every scene creates its own turtles on the canvas it is handed, runs
//! them to completion, and leaves the command log and turtle registry in
//! place so the caller can export a [`SceneReport`].
//!
//! ERROR HANDLING
//! ==============
//! Turtle construction fails only when the canvas is not ready; a panicked
//! racer task surfaces as [`SceneError::Join`].

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info};
use turtle::{Canvas, Color, DrawCommand, MemoryCanvas, TextAlign, Turtle, TurtleError, TurtleId, TurtleState};

use crate::config::{DemoConfig, SceneKind};

// ── Scene tuning ───────────────────────────────────────────────

pub const SQUARE_SIDE: f64 = 150.0;
pub const SPIRAL_SEGMENTS: u32 = 36;
pub const RACERS: [Color; 4] = [Color::RED, Color::BLUE, Color::GREEN, Color::ORANGE];
pub const RACE_LANE_GAP: f64 = 40.0;
pub const RACE_DISTANCE: f64 = 300.0;
pub const FLOWER_PETALS: u32 = 6;
pub const FLOWER_PETAL_RADIUS: f64 = 80.0;
pub const WALK_STEPS: u32 = 50;

const SPIRAL_PALETTE: [Color; 6] = [Color::RED, Color::ORANGE, Color::YELLOW, Color::GREEN, Color::BLUE, Color::PURPLE];

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Turtle(#[from] TurtleError),
    #[error("racer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Everything a headless renderer needs to replay a finished scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub scene: SceneKind,
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub turtles: Vec<TurtleSnapshot>,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurtleSnapshot {
    pub id: TurtleId,
    pub state: TurtleState,
}

impl SceneReport {
    #[must_use]
    pub fn capture(scene: SceneKind, canvas: &MemoryCanvas) -> Self {
        Self {
            scene,
            width: canvas.width(),
            height: canvas.height(),
            background: canvas.background_color(),
            turtles: canvas
                .turtles()
                .into_iter()
                .map(|(id, state)| TurtleSnapshot { id, state })
                .collect(),
            commands: canvas.commands(),
        }
    }
}

/// Run the configured scene to completion.
///
/// # Errors
///
/// Returns [`SceneError`] if a turtle cannot be created or a racer task panics.
pub async fn run(config: &DemoConfig, canvas: Arc<MemoryCanvas>) -> Result<(), SceneError> {
    info!(scene = ?config.scene, pacing = ?canvas.pacing(), speed = config.speed, "scene starting");
    match config.scene {
        SceneKind::Square => square(canvas.clone(), config.speed).await?,
        SceneKind::Spiral => spiral(canvas.clone(), config.speed).await?,
        SceneKind::Race => race(canvas.clone()).await?,
        SceneKind::Flower => flower(canvas.clone(), config.speed).await?,
        SceneKind::Walk => walk(canvas.clone(), config.speed, config.walk_seed).await?,
    }
    info!(commands = canvas.command_count(), turtles = canvas.turtle_count(), "scene finished");
    Ok(())
}

/// Filled square with a caption underneath.
///
/// # Errors
///
/// Returns [`TurtleError::CanvasNotReady`] on an unattached canvas.
pub async fn square(canvas: Arc<MemoryCanvas>, speed: u8) -> Result<(), TurtleError> {
    let mut t = Turtle::new(canvas)?;
    t.speed(speed).color(Color::BLUE).fill_color(Color::CYAN).pen_size(3.0);

    t.begin_fill();
    for _ in 0..4 {
        t.forward(SQUARE_SIDE).await;
        t.left(90.0).await;
    }
    t.end_fill();

    t.pen_up();
    t.go_to(SQUARE_SIDE / 2.0, -20.0).await;
    t.write("square", TextAlign::Center);
    t.hide_turtle();
    Ok(())
}

/// Growing square spiral cycling through a rainbow palette.
///
/// # Errors
///
/// Returns [`TurtleError::CanvasNotReady`] on an unattached canvas.
pub async fn spiral(canvas: Arc<MemoryCanvas>, speed: u8) -> Result<(), TurtleError> {
    let mut t = Turtle::new(canvas)?;
    t.speed(speed).set_background(Color::BLACK);

    for (i, color) in (0..SPIRAL_SEGMENTS).zip(SPIRAL_PALETTE.iter().cycle()) {
        t.pen_color(*color).pen_size(1.0 + f64::from(i) / 12.0);
        t.forward(f64::from(i + 1) * 6.0).await;
        t.right(89.0).await;
    }
    t.stamp();
    Ok(())
}

/// Four turtles racing across the canvas on separate tasks.
///
/// Each racer runs at a different speed, so under realtime pacing the
/// faster ones finish first while all of them share the same canvas.
///
/// # Errors
///
/// Returns [`SceneError`] if a racer cannot be created or its task panics.
pub async fn race(canvas: Arc<MemoryCanvas>) -> Result<(), SceneError> {
    let mut racers = JoinSet::new();
    let first_lane = RACE_LANE_GAP * 1.5;

    for (lane, color) in (0u8..).zip(RACERS) {
        let y = first_lane - RACE_LANE_GAP * f64::from(lane);
        let mut t = Turtle::new(canvas.clone())?;
        let speed = lane * 3 + 1;
        t.speed(0).pen_up();
        t.go_to(-RACE_DISTANCE / 2.0, y).await;
        t.pen_down().color(color).speed(speed);

        racers.spawn(async move {
            t.forward(RACE_DISTANCE).await;
            t.dot(Some(12.0), Some(color));
            (t.id(), color)
        });
    }

    let mut finish = Vec::with_capacity(RACERS.len());
    while let Some(result) = racers.join_next().await {
        let (id, color) = result?;
        debug!(id, %color, place = finish.len() + 1, "racer finished");
        finish.push(id);
    }
    info!(?finish, "race complete");
    Ok(())
}

/// Petals drawn with filled circle arcs around the origin.
///
/// # Errors
///
/// Returns [`TurtleError::CanvasNotReady`] on an unattached canvas.
pub async fn flower(canvas: Arc<MemoryCanvas>, speed: u8) -> Result<(), TurtleError> {
    let mut t = Turtle::new(canvas)?;
    t.speed(speed).color(Color::MAGENTA).fill_color(Color::PURPLE.with_alpha(160));

    for _ in 0..FLOWER_PETALS {
        t.begin_fill();
        t.circle_arc(FLOWER_PETAL_RADIUS, 60.0, None).await;
        t.left(120.0).await;
        t.circle_arc(FLOWER_PETAL_RADIUS, 60.0, None).await;
        t.left(120.0).await;
        t.end_fill();
        t.right(360.0 / f64::from(FLOWER_PETALS)).await;
    }
    t.dot(Some(24.0), Some(Color::YELLOW));
    Ok(())
}

/// Seeded random walk; the same seed always produces the same log.
///
/// # Errors
///
/// Returns [`TurtleError::CanvasNotReady`] on an unattached canvas.
pub async fn walk(canvas: Arc<MemoryCanvas>, speed: u8, seed: u64) -> Result<(), TurtleError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut t = Turtle::new(canvas.clone())?;
    t.speed(speed).pen_color(Color::GRAY);

    let half_w = canvas.width() / 2.0;
    let half_h = canvas.height() / 2.0;
    for _ in 0..WALK_STEPS {
        t.right(rng.random_range(-90.0..90.0)).await;
        t.forward(rng.random_range(5.0..30.0)).await;
        if t.xcor().abs() > half_w || t.ycor().abs() > half_h {
            debug!(x = t.xcor(), y = t.ycor(), "walker left the canvas, heading home");
            t.pen_up();
            t.home().await;
            t.pen_down();
        }
    }
    t.dot(None, Some(Color::RED));
    Ok(())
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;
