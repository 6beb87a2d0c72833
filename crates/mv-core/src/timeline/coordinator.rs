//! Timeline coordinator implementation

use std::sync::Arc;
use indexmap::IndexMap;
use tracing::{debug, info};

use super::clock::{PlaybackClock, WallClock};
use super::scheduler::{FrameHandle, FrameScheduler};
use crate::config::{PlaybackEnd, TimelineConfig};
use crate::error::{CoreError, CoreResult};
use crate::events::timeline::{FeatureSelected, FrameChanged, PlaybackToggled, SourceRegistered, SourceRemoved};
use crate::events::EventBus;
use crate::source::{clamp_frame, SharedSource, SourceKey, TimeIndexed, RESET_FRAME};
use crate::transport::{PlayState, TransportAction, TransportControl};

/// Observable state of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// No sources registered
    Idle,
    Paused { frame: usize },
    Playing { frame: usize },
}

/// Wall-clock bookkeeping of the playback loop
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub playing: bool,
    pub start_ms: f64,
    pub previous_ms: f64,
    pending: Option<FrameHandle>,
}

impl PlaybackState {
    /// The scheduled callback the next tick must carry
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

/// Owns the authoritative frame and broadcasts it to every registered source.
///
/// Sources are visited in registration order, each finishing its update before
/// the next one starts. The frame stored here is the raw requested frame;
/// clamping is left to each source.
pub struct TimelineCoordinator {
    sources: IndexMap<SourceKey, SharedSource>,
    transport: TransportControl,
    current_frame: usize,
    frame_count: usize,
    playback: PlaybackState,
    clock: PlaybackClock,
    end: PlaybackEnd,
    active_feature: Option<String>,
    scheduler: Box<dyn FrameScheduler>,
    wall_clock: Box<dyn WallClock>,
    events: Arc<EventBus>,
    next_anonymous: usize,
}

impl TimelineCoordinator {
    /// Create a coordinator with no sources
    pub fn new(
        config: &TimelineConfig,
        scheduler: impl FrameScheduler + 'static,
        wall_clock: impl WallClock + 'static,
    ) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            sources: IndexMap::new(),
            transport: TransportControl::new(),
            current_frame: RESET_FRAME,
            frame_count: 0,
            playback: PlaybackState::default(),
            clock: PlaybackClock::new(config.fps, config.speed)?,
            end: config.end,
            active_feature: None,
            scheduler: Box::new(scheduler),
            wall_clock: Box::new(wall_clock),
            events: Arc::new(EventBus::new()),
            next_anonymous: 0,
        })
    }

    /// Publish timeline events on a shared bus
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Add a source, or replace the one registered under the same key, then
    /// resync every source. Returns the key the source was stored under.
    pub fn register_source(&mut self, key: Option<SourceKey>, source: SharedSource) -> SourceKey {
        let key = key.unwrap_or_else(|| {
            self.next_anonymous += 1;
            SourceKey::new(format!("source-{}", self.next_anonymous))
        });

        let frame_count = {
            let mut guard = source.write();
            if let Some(feature) = &self.active_feature {
                guard.select_feature(feature);
            }
            guard.frame_count()
        };

        let replaced = self.sources.insert(key.clone(), source).is_some();
        self.transport.enable();
        self.resync();

        info!(
            key = %key,
            frames = frame_count,
            global_frames = self.frame_count,
            replaced,
            "Registered timeline source"
        );
        self.events.publish(SourceRegistered {
            key: key.clone(),
            frame_count,
            global_frame_count: self.frame_count,
        });
        key
    }

    /// Remove a source and resync. The global frame count may shrink.
    pub fn unregister_source(&mut self, key: &SourceKey) -> CoreResult<SharedSource> {
        let source = self
            .sources
            .shift_remove(key)
            .ok_or_else(|| CoreError::UnknownSource(key.to_string()))?;
        self.resync();

        info!(key = %key, global_frames = self.frame_count, "Removed timeline source");
        self.events.publish(SourceRemoved {
            key: key.clone(),
            global_frame_count: self.frame_count,
        });
        Ok(source)
    }

    pub fn source(&self, key: &SourceKey) -> Option<&SharedSource> {
        self.sources.get(key)
    }

    /// Registered keys in broadcast order
    pub fn source_keys(&self) -> impl Iterator<Item = &SourceKey> {
        self.sources.keys()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Global frame count as of the last recomputation
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn transport(&self) -> &TransportControl {
        &self.transport
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn playback_clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn is_playing(&self) -> bool {
        self.playback.playing
    }

    pub fn active_feature(&self) -> Option<&str> {
        self.active_feature.as_deref()
    }

    pub fn end_behavior(&self) -> PlaybackEnd {
        self.end
    }

    pub fn set_end_behavior(&mut self, end: PlaybackEnd) {
        self.end = end;
    }

    pub fn set_fps(&mut self, fps: f64) -> CoreResult<()> {
        self.clock.set_fps(fps)
    }

    pub fn set_speed(&mut self, speed: f64) -> CoreResult<()> {
        self.clock.set_speed(speed)
    }

    /// Current time of the coordinator's wall clock
    pub fn now_ms(&self) -> f64 {
        self.wall_clock.now_ms()
    }

    pub fn state(&self) -> TimelineState {
        if self.playback.playing {
            TimelineState::Playing { frame: self.current_frame }
        } else if self.sources.is_empty() {
            TimelineState::Idle
        } else {
            TimelineState::Paused { frame: self.current_frame }
        }
    }

    /// Recompute the global frame count as the maximum over all sources and
    /// hand it to the transport control
    pub fn recompute_frame_count(&mut self) -> usize {
        let count = self
            .sources
            .values()
            .map(|source| source.read().frame_count())
            .max()
            .unwrap_or(0);

        if count != self.frame_count {
            debug!(previous = self.frame_count, count, "Global frame count changed");
            self.frame_count = count;
            self.sync_frame_spans();
        }
        self.transport.set_frame_count(count);
        count
    }

    /// Broadcast `frame` to every source and to the transport
    pub fn goto_frame(&mut self, frame: usize) {
        self.recompute_frame_count();
        self.current_frame = frame;
        self.broadcast(frame);
    }

    /// Return every source to the reset frame
    pub fn reset(&mut self) {
        self.current_frame = RESET_FRAME;
        for source in self.sources.values() {
            source.write().reset();
        }
        self.transport.reset();
        self.events.publish(FrameChanged {
            frame: self.current_frame,
            frame_count: self.frame_count,
        });
    }

    /// Select the feature every series-backed source displays
    pub fn set_active_feature(&mut self, key: &str) {
        self.active_feature = Some(key.to_string());
        for source in self.sources.values() {
            source.write().select_feature(key);
        }
        info!(feature = key, "Selected active feature");
        self.events.publish(FeatureSelected { key: key.to_string() });
        self.resync();
    }

    /// Start or stop real-time playback
    pub fn toggle_play(&mut self) {
        if self.playback.playing {
            self.stop_playback();
        } else {
            self.start_playback();
        }
        self.events.publish(PlaybackToggled {
            playing: self.playback.playing,
        });
    }

    pub fn play(&mut self) {
        if !self.playback.playing {
            self.toggle_play();
        }
    }

    pub fn pause(&mut self) {
        if self.playback.playing {
            self.toggle_play();
        }
    }

    /// Advance playback from a scheduled callback.
    ///
    /// Callbacks other than the one currently armed are stale (cancelled by a
    /// pause) and are dropped. Returns the number of frames advanced.
    pub fn tick(&mut self, handle: FrameHandle, now_ms: f64) -> usize {
        if !self.playback.playing || self.playback.pending != Some(handle) {
            debug!(handle = handle.id(), "Dropping stale frame callback");
            return 0;
        }
        self.playback.pending = None;

        let delta_seconds = (now_ms - self.playback.previous_ms) / 1000.0;
        self.clock.accumulate(delta_seconds);

        let mut advanced = 0;
        while self.clock.take_frame() {
            let next = self.next_playback_frame();
            self.goto_frame(next);
            advanced += 1;

            if self.end == PlaybackEnd::Pause && next + 1 >= self.frame_count {
                info!(frame = next, "Reached end of timeline");
                self.stop_playback();
                self.events.publish(PlaybackToggled { playing: false });
                break;
            }
        }
        self.playback.previous_ms = now_ms;

        for source in self.sources.values() {
            source.write().tick(delta_seconds);
        }

        if self.playback.playing {
            self.arm();
        }
        advanced
    }

    /// Apply a user gesture reported by the transport
    pub fn handle_action(&mut self, action: TransportAction) {
        match action {
            TransportAction::Seek(frame) => self.goto_frame(frame),
            TransportAction::TogglePlay => self.toggle_play(),
            TransportAction::StepForward => self.step_forward(),
            TransportAction::StepBackward => self.step_backward(),
            TransportAction::SeekStart => self.seek_start(),
            TransportAction::SeekEnd => self.seek_end(),
        }
    }

    /// Scrubber moved to `value` in `[0, 100]`
    pub fn scrub(&mut self, value: f64) {
        self.recompute_frame_count();
        let action = self.transport.scrub(value);
        self.handle_action(action);
    }

    /// Play/pause button pressed
    pub fn press_play_pause(&mut self) {
        let action = self.transport.press_toggle();
        self.handle_action(action);
    }

    pub fn step_forward(&mut self) {
        self.pause();
        let count = self.recompute_frame_count();
        let frame = clamp_frame(self.current_frame.saturating_add(1), count);
        self.goto_frame(frame);
    }

    pub fn step_backward(&mut self) {
        self.pause();
        let count = self.recompute_frame_count();
        let frame = clamp_frame(self.current_frame, count).saturating_sub(1);
        self.goto_frame(frame);
    }

    pub fn seek_start(&mut self) {
        self.pause();
        self.goto_frame(RESET_FRAME);
    }

    pub fn seek_end(&mut self) {
        self.pause();
        let count = self.recompute_frame_count();
        self.goto_frame(count.saturating_sub(1));
    }

    fn broadcast(&mut self, frame: usize) {
        for source in self.sources.values() {
            source.write().goto_frame(frame);
        }
        self.transport.goto_frame(frame);

        debug!(frame, frame_count = self.frame_count, sources = self.sources.len(), "Broadcast frame");
        self.events.publish(FrameChanged {
            frame,
            frame_count: self.frame_count,
        });
    }

    fn sync_frame_spans(&self) {
        for source in self.sources.values() {
            source.write().sync_frame_span(self.frame_count);
        }
    }

    /// Full resync after the registry or feature key changed
    fn resync(&mut self) {
        self.recompute_frame_count();
        self.sync_frame_spans();
        debug_assert!(self
            .sources
            .values()
            .all(|source| source.read().frame_count() <= self.frame_count));
        self.reset();
    }

    fn next_playback_frame(&self) -> usize {
        let next = self.current_frame.saturating_add(1);
        match self.end {
            PlaybackEnd::Loop if self.frame_count > 0 && next >= self.frame_count => RESET_FRAME,
            _ => next,
        }
    }

    fn start_playback(&mut self) {
        let count = self.recompute_frame_count();
        if self.end == PlaybackEnd::Pause && count > 0 && self.current_frame + 1 >= count {
            self.goto_frame(RESET_FRAME);
        }

        let now = self.wall_clock.now_ms();
        self.playback.playing = true;
        self.playback.start_ms = now;
        self.playback.previous_ms = now;
        self.clock.clear();
        self.arm();
        self.transport.set_play_state(PlayState::Playing);
        info!(frame = self.current_frame, fps = self.clock.fps(), "Playback started");
    }

    fn stop_playback(&mut self) {
        self.playback.playing = false;
        if let Some(handle) = self.playback.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.transport.set_play_state(PlayState::Paused);
        info!(frame = self.current_frame, "Playback paused");
    }

    fn arm(&mut self) {
        debug_assert!(self.playback.pending.is_none(), "playback armed twice");
        self.playback.pending = Some(self.scheduler.request_frame());
    }
}

impl Drop for TimelineCoordinator {
    fn drop(&mut self) {
        if let Some(handle) = self.playback.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::typed_handler;
    use crate::source::share;
    use crate::timeline::{ManualClock, ManualScheduler};
    use parking_lot::{Mutex, RwLock};

    struct FakeSource {
        name: String,
        frames: usize,
        frame: usize,
        resets: usize,
        feature: Option<String>,
        spans: Vec<usize>,
        ticks: Vec<f64>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl FakeSource {
        fn new(name: &str, frames: usize) -> Self {
            Self::logged(name, frames, Arc::new(Mutex::new(Vec::new())))
        }

        fn logged(name: &str, frames: usize, log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                name: name.to_string(),
                frames,
                frame: 0,
                resets: 0,
                feature: None,
                spans: Vec::new(),
                ticks: Vec::new(),
                log,
            }
        }
    }

    impl TimeIndexed for FakeSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn frame_count(&self) -> usize {
            self.frames
        }

        fn current_frame(&self) -> usize {
            self.frame
        }

        fn goto_frame(&mut self, frame: usize) {
            self.frame = clamp_frame(frame, self.frames);
            self.log.lock().push(format!("{}:{}", self.name, frame));
        }

        fn tick(&mut self, delta_seconds: f64) {
            self.ticks.push(delta_seconds);
        }

        fn reset(&mut self) {
            self.resets += 1;
            self.frame = RESET_FRAME;
        }

        fn select_feature(&mut self, key: &str) {
            self.feature = Some(key.to_string());
        }

        fn sync_frame_span(&mut self, span: usize) {
            self.spans.push(span);
        }
    }

    fn coordinator(config: TimelineConfig) -> (TimelineCoordinator, ManualScheduler, ManualClock) {
        let scheduler = ManualScheduler::new();
        let clock = ManualClock::new();
        let coordinator = TimelineCoordinator::new(&config, scheduler.clone(), clock.clone()).unwrap();
        (coordinator, scheduler, clock)
    }

    fn add(coordinator: &mut TimelineCoordinator, key: &str, source: FakeSource) -> Arc<RwLock<FakeSource>> {
        let (typed, shared) = share(source);
        coordinator.register_source(Some(SourceKey::from(key)), shared);
        typed
    }

    /// Deliver every due callback at `now_ms`
    fn deliver(coordinator: &mut TimelineCoordinator, scheduler: &ManualScheduler, now_ms: f64) -> usize {
        scheduler
            .take_due()
            .into_iter()
            .map(|handle| coordinator.tick(handle, now_ms))
            .sum()
    }

    #[test]
    fn test_global_frame_count_is_max_and_never_shrinks_on_add() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        assert_eq!(coordinator.state(), TimelineState::Idle);

        add(&mut coordinator, "motion", FakeSource::new("motion", 120));
        assert_eq!(coordinator.frame_count(), 120);

        add(&mut coordinator, "short", FakeSource::new("short", 30));
        assert_eq!(coordinator.frame_count(), 120);

        add(&mut coordinator, "long", FakeSource::new("long", 300));
        assert_eq!(coordinator.frame_count(), 300);
        assert_eq!(coordinator.transport().frame_count(), 300);
        assert!(coordinator.transport().is_enabled());
    }

    #[test]
    fn test_goto_passes_raw_frame_and_sources_clamp() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let long = add(&mut coordinator, "long", FakeSource::new("long", 100));
        let short = add(&mut coordinator, "short", FakeSource::new("short", 10));

        coordinator.goto_frame(50);

        assert_eq!(coordinator.current_frame(), 50);
        assert_eq!(long.read().current_frame(), 50);
        assert_eq!(short.read().current_frame(), 9);
        assert_eq!(coordinator.transport().position(), 50.0);
        assert_eq!(coordinator.state(), TimelineState::Paused { frame: 50 });

        coordinator.goto_frame(50);
        assert_eq!(short.read().current_frame(), 9);
        assert_eq!(coordinator.transport().position(), 50.0);
    }

    #[test]
    fn test_broadcast_follows_registration_order() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        add(&mut coordinator, "b", FakeSource::logged("b", 5, log.clone()));
        add(&mut coordinator, "a", FakeSource::logged("a", 5, log.clone()));
        add(&mut coordinator, "c", FakeSource::logged("c", 5, log.clone()));
        log.lock().clear();

        coordinator.goto_frame(2);
        assert_eq!(*log.lock(), vec!["b:2", "a:2", "c:2"]);
    }

    #[test]
    fn test_replacing_a_key_keeps_its_slot_and_recomputes() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        add(&mut coordinator, "first", FakeSource::logged("first", 200, log.clone()));
        add(&mut coordinator, "second", FakeSource::logged("second", 50, log.clone()));

        add(&mut coordinator, "first", FakeSource::logged("replacement", 80, log.clone()));
        assert_eq!(coordinator.source_count(), 2);
        assert_eq!(coordinator.frame_count(), 80);

        log.lock().clear();
        coordinator.goto_frame(1);
        assert_eq!(*log.lock(), vec!["replacement:1", "second:1"]);
    }

    #[test]
    fn test_registration_resets_all_sources_and_syncs_span() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let first = add(&mut coordinator, "first", FakeSource::new("first", 40));
        coordinator.goto_frame(25);

        let second = add(&mut coordinator, "second", FakeSource::new("second", 90));
        assert_eq!(coordinator.current_frame(), RESET_FRAME);
        assert_eq!(first.read().current_frame(), RESET_FRAME);
        assert_eq!(first.read().resets, 2);
        assert_eq!(second.read().resets, 1);
        assert_eq!(first.read().spans.last(), Some(&90));
        assert_eq!(second.read().spans.last(), Some(&90));
    }

    #[test]
    fn test_anonymous_sources_get_generated_keys() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let (_, shared) = share(FakeSource::new("x", 3));
        let key = coordinator.register_source(None, shared);
        assert_eq!(key.as_str(), "source-1");
        assert!(coordinator.source(&key).is_some());
    }

    #[test]
    fn test_unregister_shrinks_count_and_rejects_unknown_keys() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        add(&mut coordinator, "long", FakeSource::new("long", 500));
        add(&mut coordinator, "short", FakeSource::new("short", 20));

        coordinator.unregister_source(&SourceKey::from("long")).unwrap();
        assert_eq!(coordinator.frame_count(), 20);

        let err = coordinator.unregister_source(&SourceKey::from("long")).err().unwrap();
        assert!(matches!(err, CoreError::UnknownSource(_)));
    }

    #[test]
    fn test_scrub_round_trip_through_coordinator() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let source = add(&mut coordinator, "s", FakeSource::new("s", 100));

        coordinator.scrub(50.0);
        assert_eq!(coordinator.current_frame(), 50);
        assert_eq!(source.read().current_frame(), 50);
        assert_eq!(coordinator.transport().position(), 50.0);
    }

    #[test]
    fn test_playback_catches_up_with_accumulator() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig::default());
        let source = add(&mut coordinator, "s", FakeSource::new("s", 1000));

        clock.set(1000.0);
        coordinator.toggle_play();
        assert!(coordinator.is_playing());
        assert_eq!(scheduler.pending_count(), 1);

        let advanced = deliver(&mut coordinator, &scheduler, 1120.0);
        assert_eq!(advanced, 2);
        assert_eq!(coordinator.current_frame(), 2);
        assert_eq!(source.read().current_frame(), 2);

        let leftover = coordinator.playback_clock().accumulated();
        assert!((leftover - (0.12 - 2.0 / 24.98)).abs() < 1e-9);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(source.read().ticks.len(), 1);
    }

    #[test]
    fn test_pause_then_resume_does_not_double_advance() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig {
            fps: 10.0,
            ..TimelineConfig::default()
        });
        add(&mut coordinator, "s", FakeSource::new("s", 1000));

        clock.set(0.0);
        coordinator.toggle_play();
        assert_eq!(deliver(&mut coordinator, &scheduler, 120.0), 1);
        assert_eq!(coordinator.current_frame(), 1);

        // The re-armed callback is already queued by the host when pause lands
        let stale = scheduler.take_due();
        assert_eq!(stale.len(), 1);
        coordinator.toggle_play();
        assert!(!coordinator.is_playing());

        clock.set(500.0);
        coordinator.toggle_play();
        let mut advanced = 0;
        for handle in stale.into_iter().chain(scheduler.take_due()) {
            advanced += coordinator.tick(handle, 620.0);
        }

        assert_eq!(advanced, 1);
        assert_eq!(coordinator.current_frame(), 2);
    }

    #[test]
    fn test_pause_cancels_pending_callback() {
        let (mut coordinator, scheduler, _) = coordinator(TimelineConfig::default());
        add(&mut coordinator, "s", FakeSource::new("s", 10));

        coordinator.toggle_play();
        assert!(scheduler.has_pending());
        coordinator.toggle_play();
        assert!(!scheduler.has_pending());
        assert_eq!(coordinator.transport().play_state(), PlayState::Paused);
    }

    #[test]
    fn test_pause_at_end_stops_on_last_frame() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig {
            fps: 10.0,
            end: PlaybackEnd::Pause,
            ..TimelineConfig::default()
        });
        add(&mut coordinator, "s", FakeSource::new("s", 3));

        clock.set(0.0);
        coordinator.toggle_play();
        let advanced = deliver(&mut coordinator, &scheduler, 1000.0);

        assert_eq!(advanced, 2);
        assert_eq!(coordinator.current_frame(), 2);
        assert!(!coordinator.is_playing());
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_loop_wraps_to_reset_frame() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig {
            fps: 10.0,
            end: PlaybackEnd::Loop,
            ..TimelineConfig::default()
        });
        let source = add(&mut coordinator, "s", FakeSource::new("s", 3));

        clock.set(0.0);
        coordinator.toggle_play();
        assert_eq!(deliver(&mut coordinator, &scheduler, 350.0), 3);
        assert_eq!(coordinator.current_frame(), 0);
        assert_eq!(source.read().current_frame(), 0);
        assert!(coordinator.is_playing());
    }

    #[test]
    fn test_continue_lets_frame_run_past_sources() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig {
            fps: 10.0,
            ..TimelineConfig::default()
        });
        let source = add(&mut coordinator, "s", FakeSource::new("s", 2));

        clock.set(0.0);
        coordinator.toggle_play();
        deliver(&mut coordinator, &scheduler, 550.0);

        assert_eq!(coordinator.current_frame(), 5);
        assert_eq!(source.read().current_frame(), 1);
        assert_eq!(coordinator.transport().current_frame(), 1);
    }

    #[test]
    fn test_playing_without_sources_is_safe() {
        let (mut coordinator, scheduler, clock) = coordinator(TimelineConfig::default());
        clock.set(0.0);
        coordinator.toggle_play();
        deliver(&mut coordinator, &scheduler, 100.0);

        assert_eq!(coordinator.frame_count(), 0);
        assert_eq!(coordinator.transport().position(), 0.0);
        assert!(matches!(coordinator.state(), TimelineState::Playing { .. }));
    }

    #[test]
    fn test_feature_selection_reaches_existing_and_new_sources() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        let first = add(&mut coordinator, "first", FakeSource::new("first", 5));

        coordinator.set_active_feature("LEFT_ARM");
        assert_eq!(first.read().feature.as_deref(), Some("LEFT_ARM"));

        let second = add(&mut coordinator, "second", FakeSource::new("second", 5));
        assert_eq!(second.read().feature.as_deref(), Some("LEFT_ARM"));
        assert_eq!(coordinator.active_feature(), Some("LEFT_ARM"));
    }

    #[test]
    fn test_steps_pause_and_clamp() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        add(&mut coordinator, "s", FakeSource::new("s", 4));

        coordinator.toggle_play();
        coordinator.step_forward();
        assert!(!coordinator.is_playing());
        assert_eq!(coordinator.current_frame(), 1);

        coordinator.seek_end();
        assert_eq!(coordinator.current_frame(), 3);
        coordinator.step_forward();
        assert_eq!(coordinator.current_frame(), 3);

        coordinator.seek_start();
        coordinator.step_backward();
        assert_eq!(coordinator.current_frame(), 0);
    }

    #[test]
    fn test_press_play_pause_keeps_transport_in_sync() {
        let (mut coordinator, _, _) = coordinator(TimelineConfig::default());
        add(&mut coordinator, "s", FakeSource::new("s", 4));

        coordinator.press_play_pause();
        assert!(coordinator.is_playing());
        assert_eq!(coordinator.transport().toggle_label(), "Pause");

        coordinator.handle_action(TransportAction::TogglePlay);
        assert!(!coordinator.is_playing());
        assert_eq!(coordinator.transport().toggle_label(), "Play");
    }

    #[test]
    fn test_events_are_published() {
        let (coordinator, _, _) = coordinator(TimelineConfig::default());
        let events = Arc::new(EventBus::new());
        let mut coordinator = coordinator.with_events(events.clone());

        let frames = Arc::new(Mutex::new(Vec::new()));
        let toggles = Arc::new(Mutex::new(Vec::new()));
        let seen = frames.clone();
        events.subscribe::<FrameChanged>(typed_handler(move |e: &FrameChanged| seen.lock().push(e.frame)));
        let played = toggles.clone();
        events.subscribe::<PlaybackToggled>(typed_handler(move |e: &PlaybackToggled| played.lock().push(e.playing)));

        add(&mut coordinator, "s", FakeSource::new("s", 10));
        coordinator.goto_frame(7);
        coordinator.toggle_play();
        coordinator.toggle_play();

        assert_eq!(frames.lock().last(), Some(&7));
        assert_eq!(*toggles.lock(), vec![true, false]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = TimelineCoordinator::new(
            &TimelineConfig { fps: -1.0, ..TimelineConfig::default() },
            ManualScheduler::new(),
            ManualClock::new(),
        );
        assert!(matches!(result, Err(CoreError::InvalidFrameRate(_))));
    }
}
