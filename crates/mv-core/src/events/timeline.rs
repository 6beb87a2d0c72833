//! Events published by the timeline coordinator

use super::Event;
use crate::source::SourceKey;

/// A source was added or replaced
#[derive(Debug, Clone)]
pub struct SourceRegistered {
    pub key: SourceKey,
    pub frame_count: usize,
    pub global_frame_count: usize,
}

/// A source was removed from the registry
#[derive(Debug, Clone)]
pub struct SourceRemoved {
    pub key: SourceKey,
    pub global_frame_count: usize,
}

/// The shared frame was broadcast to every source
#[derive(Debug, Clone, PartialEq)]
pub struct FrameChanged {
    pub frame: usize,
    pub frame_count: usize,
}

/// Playback started or stopped
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackToggled {
    pub playing: bool,
}

/// The active feature key changed
#[derive(Debug, Clone)]
pub struct FeatureSelected {
    pub key: String,
}

macro_rules! timeline_events {
    ($($event:ty),* $(,)?) => {
        $(
            impl Event for $event {
                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }
            }
        )*
    };
}

timeline_events!(SourceRegistered, SourceRemoved, FrameChanged, PlaybackToggled, FeatureSelected);
