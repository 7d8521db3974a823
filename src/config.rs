//! Demo configuration parsed from environment variables.

use std::str::FromStr;

use turtle::Pacing;

pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
pub const DEFAULT_SPEED: u8 = turtle::consts::DEFAULT_SPEED;
pub const DEFAULT_WALK_SEED: u64 = 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown TURTLE_SCENE: {0} (expected square, spiral, race, flower or walk)")]
    UnknownScene(String),
}

/// Which demo scene to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Square,
    Spiral,
    Race,
    Flower,
    Walk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub width: f64,
    pub height: f64,
    pub pacing: Pacing,
    pub speed: u8,
    pub scene: SceneKind,
    pub walk_seed: u64,
}

impl DemoConfig {
    /// Build the demo config from environment variables.
    ///
    /// Optional:
    /// - `TURTLE_CANVAS_WIDTH` / `TURTLE_CANVAS_HEIGHT`: default 800 x 600
    /// - `TURTLE_ANIMATE`: `true` paces motion on the tokio timer; default `false`
    /// - `TURTLE_SPEED`: 0..=10, default 5
    /// - `TURTLE_SCENE`: `square` (default), `spiral`, `race`, `flower`, `walk`
    /// - `TURTLE_WALK_SEED`: RNG seed for the `walk` scene, default 7
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownScene`] for an unrecognized scene name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DemoConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownScene`] for an unrecognized scene name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scene = parse_scene(lookup("TURTLE_SCENE").as_deref())?;
        let animate = lookup_parse(&lookup, "TURTLE_ANIMATE", false);

        Ok(Self {
            width: lookup_parse(&lookup, "TURTLE_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
            height: lookup_parse(&lookup, "TURTLE_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
            pacing: if animate { Pacing::Realtime } else { Pacing::Instant },
            speed: lookup_parse(&lookup, "TURTLE_SPEED", DEFAULT_SPEED),
            scene,
            walk_seed: lookup_parse(&lookup, "TURTLE_WALK_SEED", DEFAULT_WALK_SEED),
        })
    }
}

fn lookup_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_scene(raw: Option<&str>) -> Result<SceneKind, ConfigError> {
    match raw.unwrap_or("square") {
        "square" => Ok(SceneKind::Square),
        "spiral" => Ok(SceneKind::Spiral),
        "race" => Ok(SceneKind::Race),
        "flower" => Ok(SceneKind::Flower),
        "walk" => Ok(SceneKind::Walk),
        other => Err(ConfigError::UnknownScene(other.to_string())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
