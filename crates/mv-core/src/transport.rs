//! Transport control model: scrubber position and play/pause toggle
//!
//! The control never owns the frame. Input handlers turn user gestures into
//! [`TransportAction`]s for the coordinator, and the displayed position is
//! whatever the coordinator last pushed through `goto_frame`.

use serde::{Deserialize, Serialize};

use crate::source::{clamp_frame, TimeIndexed};

/// Scrubber value domain is `[0, SCRUB_MAX]`
pub const SCRUB_MAX: f64 = 100.0;

/// Play/pause state shown by the toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Paused,
    Playing,
}

impl PlayState {
    pub fn toggled(self) -> Self {
        match self {
            PlayState::Paused => PlayState::Playing,
            PlayState::Playing => PlayState::Paused,
        }
    }
}

/// Request emitted by user interaction with the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportAction {
    /// Scrubbed or clicked to a frame
    Seek(usize),
    /// Play/pause pressed
    TogglePlay,
    StepForward,
    StepBackward,
    SeekStart,
    SeekEnd,
}

/// Scrubber + toggle state
#[derive(Debug, Clone, Default)]
pub struct TransportControl {
    frame_count: usize,
    frame: usize,
    position: f64,
    state: PlayState,
    enabled: bool,
}

impl TransportControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the denominator used for scrub computations
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
    }

    /// Translate a scrubber value in `[0, 100]` into a seek request
    pub fn scrub(&self, value: f64) -> TransportAction {
        let value = if value.is_finite() { value.clamp(0.0, SCRUB_MAX) } else { 0.0 };
        let frame = (value * self.frame_count as f64 / SCRUB_MAX).floor() as usize;
        TransportAction::Seek(frame)
    }

    /// Flip the toggle and report it
    pub fn press_toggle(&mut self) -> TransportAction {
        self.state = self.state.toggled();
        TransportAction::TogglePlay
    }

    pub fn set_play_state(&mut self, state: PlayState) {
        self.state = state;
    }

    pub fn play_state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Label of the toggle button for the current state
    pub fn toggle_label(&self) -> &'static str {
        match self.state {
            PlayState::Playing => "Pause",
            PlayState::Paused => "Play",
        }
    }

    /// Scrubber position in `[0, 100]`
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Controls start disabled until the first source is registered
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl TimeIndexed for TransportControl {
    fn name(&self) -> &str {
        "transport"
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn current_frame(&self) -> usize {
        self.frame
    }

    fn goto_frame(&mut self, frame: usize) {
        self.frame = clamp_frame(frame, self.frame_count);
        self.position = if self.frame_count == 0 {
            0.0
        } else {
            self.frame as f64 / self.frame_count as f64 * SCRUB_MAX
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_round_trip() {
        let mut transport = TransportControl::new();
        transport.set_frame_count(100);

        let action = transport.scrub(50.0);
        assert_eq!(action, TransportAction::Seek(50));

        transport.goto_frame(50);
        assert_eq!(transport.position(), 50.0);
    }

    #[test]
    fn test_scrub_floors_and_clamps_input() {
        let mut transport = TransportControl::new();
        transport.set_frame_count(7);
        assert_eq!(transport.scrub(50.0), TransportAction::Seek(3));
        assert_eq!(transport.scrub(-20.0), TransportAction::Seek(0));
        assert_eq!(transport.scrub(250.0), TransportAction::Seek(7));
        assert_eq!(transport.scrub(f64::NAN), TransportAction::Seek(0));
    }

    #[test]
    fn test_zero_frames_never_divides() {
        let mut transport = TransportControl::new();
        assert_eq!(transport.scrub(80.0), TransportAction::Seek(0));

        transport.goto_frame(12);
        assert_eq!(transport.current_frame(), 0);
        assert_eq!(transport.position(), 0.0);
    }

    #[test]
    fn test_goto_clamps_to_last_frame() {
        let mut transport = TransportControl::new();
        transport.set_frame_count(10);
        transport.goto_frame(42);
        assert_eq!(transport.current_frame(), 9);
        assert_eq!(transport.position(), 90.0);
    }

    #[test]
    fn test_toggle_label_follows_new_state() {
        let mut transport = TransportControl::new();
        assert_eq!(transport.toggle_label(), "Play");

        assert_eq!(transport.press_toggle(), TransportAction::TogglePlay);
        assert!(transport.is_playing());
        assert_eq!(transport.toggle_label(), "Pause");

        transport.press_toggle();
        assert_eq!(transport.play_state(), PlayState::Paused);
    }
}
