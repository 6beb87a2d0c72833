//! Opaque motion-capture track
//!
//! Parsing and skinning live outside this crate. A track only knows how many
//! frames it has and forwards each frame change to a pose hook.

use std::fmt;
use mv_core::{clamp_frame, TimeIndexed};

/// Called with the clamped frame whenever the track moves
pub type PoseHook = Box<dyn FnMut(usize) + Send + Sync>;

pub struct MotionTrack {
    name: String,
    frame_count: usize,
    frame: usize,
    elapsed: f64,
    hook: Option<PoseHook>,
}

impl MotionTrack {
    pub fn new(name: impl Into<String>, frame_count: usize) -> Self {
        Self {
            name: name.into(),
            frame_count,
            frame: 0,
            elapsed: 0.0,
            hook: None,
        }
    }

    pub fn with_pose_hook(mut self, hook: impl FnMut(usize) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Seconds of sub-animation time received through `tick`
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl TimeIndexed for MotionTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn current_frame(&self) -> usize {
        self.frame
    }

    fn goto_frame(&mut self, frame: usize) {
        if self.frame_count == 0 {
            return;
        }
        self.frame = clamp_frame(frame, self.frame_count);
        if let Some(hook) = self.hook.as_mut() {
            hook(self.frame);
        }
    }

    fn tick(&mut self, delta_seconds: f64) {
        self.elapsed += delta_seconds;
    }
}

impl fmt::Debug for MotionTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionTrack")
            .field("name", &self.name)
            .field("frame_count", &self.frame_count)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
