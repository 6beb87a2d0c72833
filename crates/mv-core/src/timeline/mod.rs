//! Shared timeline: coordinator, playback pacing and frame scheduling

mod clock;
mod coordinator;
mod scheduler;

pub use clock::{ManualClock, PlaybackClock, SystemClock, WallClock};
pub use coordinator::{PlaybackState, TimelineCoordinator, TimelineState};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
