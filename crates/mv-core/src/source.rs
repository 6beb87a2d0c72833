//! Time-indexed source capability
//!
//! Every component that follows the shared timeline (motion tracks, annotation
//! bars, graphs, the transport control) implements [`TimeIndexed`]. The
//! coordinator only ever talks to sources through this trait.

use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Frame every source returns to on `reset()`.
pub const RESET_FRAME: usize = 0;

/// A source shared between the coordinator registry and whoever draws it.
pub type SharedSource = Arc<RwLock<dyn TimeIndexed>>;

/// Trait for components driven by the shared frame counter
pub trait TimeIndexed: Send + Sync {
    /// Human readable name, used for logging
    fn name(&self) -> &str;

    /// Total addressable frames. 0 means the source is inert.
    fn frame_count(&self) -> usize;

    /// The frame this source currently displays
    fn current_frame(&self) -> usize;

    /// Move to `frame`. Implementations clamp with [`clamp_frame`]; out of
    /// range requests are a normal case.
    fn goto_frame(&mut self, frame: usize);

    /// Per-tick time delta for self-driven sub-animations
    fn tick(&mut self, _delta_seconds: f64) {}

    /// Return to the initial display frame and redraw
    fn reset(&mut self) {
        self.goto_frame(RESET_FRAME);
    }

    /// Switch the active feature key. Sources without named features ignore it.
    fn select_feature(&mut self, _key: &str) {}

    /// Receive the global frame count. Renderers that lay lines out against the
    /// whole timeline use it as their horizontal span.
    fn sync_frame_span(&mut self, _span: usize) {}
}

/// Clamp `frame` into `[0, count - 1]`, or 0 when there are no frames.
pub fn clamp_frame(frame: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        frame.min(count - 1)
    }
}

/// Wrap a concrete source for registration while keeping a typed handle
pub fn share<T: TimeIndexed + 'static>(source: T) -> (Arc<RwLock<T>>, SharedSource) {
    let typed = Arc::new(RwLock::new(source));
    let shared: SharedSource = typed.clone();
    (typed, shared)
}

/// Registry key identifying a source for later replacement or removal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SourceKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
