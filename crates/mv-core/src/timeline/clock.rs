//! Playback pacing: a fixed-cadence frame accumulator and wall-clock sources

use std::sync::Arc;
use std::time::Instant;
use parking_lot::Mutex;

use crate::config::{validate_fps, validate_speed};
use crate::error::CoreResult;

/// Converts wall-clock deltas into whole frame steps.
///
/// Time accumulates until it covers one frame period; each step consumes
/// exactly one period, so a late tick catches up with several steps and the
/// remainder carries into the next tick.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    fps: f64,
    seconds_per_frame: f64,
    speed: f64,
    accumulated: f64,
}

impl PlaybackClock {
    pub fn new(fps: f64, speed: f64) -> CoreResult<Self> {
        validate_fps(fps)?;
        validate_speed(speed)?;
        Ok(Self {
            fps,
            seconds_per_frame: 1.0 / fps,
            speed,
            accumulated: 0.0,
        })
    }

    pub fn set_fps(&mut self, fps: f64) -> CoreResult<()> {
        validate_fps(fps)?;
        self.fps = fps;
        self.seconds_per_frame = 1.0 / fps;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f64) -> CoreResult<()> {
        validate_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn seconds_per_frame(&self) -> f64 {
        self.seconds_per_frame
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time carried over since the last frame step
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Drop any carried-over time
    pub fn clear(&mut self) {
        self.accumulated = 0.0;
    }

    /// Add a wall-clock delta in seconds, scaled by the playback speed.
    /// Negative or non-finite deltas (clock went backwards) add nothing.
    pub fn accumulate(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.accumulated += delta_seconds * self.speed;
        }
    }

    /// Consume one frame period if enough time has accumulated
    pub fn take_frame(&mut self) -> bool {
        if self.accumulated >= self.seconds_per_frame {
            self.accumulated -= self.seconds_per_frame;
            true
        } else {
            false
        }
    }
}

/// Monotonic millisecond time source
pub trait WallClock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Milliseconds since the clock was created
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: f64) {
        *self.now.lock() = now_ms;
    }

    pub fn advance(&self, delta_ms: f64) -> f64 {
        let mut now = self.now.lock();
        *now += delta_ms;
        *now
    }
}

impl WallClock for ManualClock {
    fn now_ms(&self) -> f64 {
        *self.now.lock()
    }
}
