//! Core functionality for the motion viewer
//!
//! This crate provides the shared timeline: the time-indexed source contract,
//! the coordinator that owns the authoritative frame, playback pacing and the
//! transport control model.

pub mod config;
pub mod error;
pub mod events;
pub mod source;
pub mod timeline;
pub mod transport;

// Re-export commonly used types
pub use config::{PlaybackEnd, TimelineConfig, DEFAULT_FPS};
pub use error::{CoreError, CoreResult};
pub use events::timeline::{FeatureSelected, FrameChanged, PlaybackToggled, SourceRegistered, SourceRemoved};
pub use events::{handler_from_fn, typed_handler, Event, EventBus, EventHandler};
pub use source::{clamp_frame, share, SharedSource, SourceKey, TimeIndexed, RESET_FRAME};
pub use timeline::{
    FrameHandle, FrameScheduler, ManualClock, ManualScheduler, PlaybackClock, SystemClock,
    TimelineCoordinator, TimelineState, WallClock,
};
pub use transport::{PlayState, TransportAction, TransportControl};
