// config.rs - Session configuration
//
// Defaults match the classic board (40x18 cells of 16px, one generation every
// four seconds). Every value can be overridden from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{LifeError, LifeResult};

pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_HEIGHT: usize = 18;
pub const DEFAULT_CELL_SIZE: f32 = 16.0;
pub const DEFAULT_FPS: f64 = 0.25;
pub const DEFAULT_STORE_PATH: &str = "data/snapshots.json";
/// Slowest accepted playback: one generation a day.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Edge length of one cell on the drawing surface, in pixels
    pub cell_size: f32,
    /// Generations per second while playing
    pub fps: f64,
    /// Location of the JSON snapshot store
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            fps: DEFAULT_FPS,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl Config {
    /// Create config from `CONWAY_*` environment variables, falling back to
    /// the defaults for anything missing or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = parse_positive::<usize>(&lookup, "CONWAY_WIDTH") {
            config.width = width;
        }
        if let Some(height) = parse_positive::<usize>(&lookup, "CONWAY_HEIGHT") {
            config.height = height;
        }
        if let Some(size) = parse_positive::<f32>(&lookup, "CONWAY_CELL_SIZE") {
            config.cell_size = size;
        }
        if let Some(fps) = parse_positive::<f64>(&lookup, "CONWAY_FPS") {
            if interval_for(fps).is_some() {
                config.fps = fps;
            } else {
                tracing::warn!(fps, "playback rate too slow, keeping default");
            }
        }
        if let Some(path) = lookup("CONWAY_STORE").filter(|p| !p.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        config
    }

    /// Period of the playback timer: one generation every `1 / fps` seconds.
    /// Rates that [`Config::validate`] rejects give [`MAX_TICK_INTERVAL`].
    pub fn tick_interval(&self) -> Duration {
        interval_for(self.fps).unwrap_or(MAX_TICK_INTERVAL)
    }

    /// Reject configurations that cannot describe a board.
    pub fn validate(&self) -> LifeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::config(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LifeError::config(format!("invalid cell size {}", self.cell_size)));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(LifeError::config(format!("invalid fps {}", self.fps)));
        }
        if interval_for(self.fps).is_none() {
            return Err(LifeError::config(format!(
                "fps {} is too slow, one generation must take at most {}s",
                self.fps,
                MAX_TICK_INTERVAL.as_secs()
            )));
        }
        Ok(())
    }
}

fn interval_for(fps: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / fps)
        .ok()
        .filter(|interval| *interval <= MAX_TICK_INTERVAL)
}

trait Positive {
    fn is_positive(&self) -> bool;
}

impl Positive for usize {
    fn is_positive(&self) -> bool {
        *self > 0
    }
}

impl Positive for f32 {
    fn is_positive(&self) -> bool {
        self.is_finite() && *self > 0.0
    }
}

impl Positive for f64 {
    fn is_positive(&self) -> bool {
        self.is_finite() && *self > 0.0
    }
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr + Positive,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value.is_positive() => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid setting, keeping default");
            None
        }
    }
}
