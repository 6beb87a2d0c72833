//! Timeline configuration

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default playback rate of motion capture recordings
pub const DEFAULT_FPS: f64 = 24.98;

/// What playback does once the last frame of the global count is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackEnd {
    /// Keep counting; every source holds its last frame
    #[default]
    Continue,
    /// Pause on the last frame
    Pause,
    /// Wrap around to the reset frame
    Loop,
}

/// Playback settings owned by the timeline coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Frames per second of the shared timeline
    pub fps: f64,

    /// Multiplier applied to wall-clock time
    pub speed: f64,

    /// End-of-timeline behavior
    pub end: PlaybackEnd,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            speed: 1.0,
            end: PlaybackEnd::Continue,
        }
    }
}

impl TimelineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        validate_fps(self.fps)?;
        validate_speed(self.speed)?;
        Ok(())
    }
}

pub(crate) fn validate_fps(fps: f64) -> CoreResult<()> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidFrameRate(fps))
    }
}

pub(crate) fn validate_speed(speed: f64) -> CoreResult<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidSpeed(speed))
    }
}
