//! Transport panel: playback buttons, scrubber and speed control

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use mv_core::transport::SCRUB_MAX;
use mv_core::{CoreResult, PlaybackEnd, TimelineCoordinator, TransportAction};
use tracing::debug;

/// Input gathered by the panel during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    /// Scrubber dragged or clicked at a value in `[0, 100]`
    Scrub(f64),
    /// Play/pause toggle pressed
    PlayPause,
    Action(TransportAction),
    SetSpeed(f64),
    SetEnd(PlaybackEnd),
}

/// Feed panel input to the coordinator in the order it happened
pub fn apply_events(coordinator: &mut TimelineCoordinator, events: &[PanelEvent]) -> CoreResult<()> {
    for event in events {
        debug!(?event, "Transport input");
        match *event {
            PanelEvent::Scrub(value) => coordinator.scrub(value),
            PanelEvent::PlayPause => coordinator.press_play_pause(),
            PanelEvent::Action(action) => coordinator.handle_action(action),
            PanelEvent::SetSpeed(speed) => coordinator.set_speed(speed)?,
            PanelEvent::SetEnd(end) => coordinator.set_end_behavior(end),
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct TransportPanelConfig {
    pub scrubber_height: f32,
    pub track_color: Color32,
    pub played_color: Color32,
    pub playhead_color: Color32,
}

impl Default for TransportPanelConfig {
    fn default() -> Self {
        Self {
            scrubber_height: 24.0,
            track_color: Color32::from_gray(60),
            played_color: Color32::from_rgb(100, 150, 250).linear_multiply(0.5),
            playhead_color: Color32::from_rgb(100, 150, 250),
        }
    }
}

/// Playback controls bound to a [`TimelineCoordinator`]
#[derive(Debug, Clone)]
pub struct TransportPanel {
    config: TransportPanelConfig,
    speed: f64,
}

impl TransportPanel {
    pub fn new(speed: f64) -> Self {
        Self {
            config: TransportPanelConfig::default(),
            speed,
        }
    }

    pub fn with_config(mut self, config: TransportPanelConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw the panel and return what the user did
    pub fn ui(&mut self, ui: &mut egui::Ui, coordinator: &TimelineCoordinator) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        let transport = coordinator.transport();

        ui.add_enabled_ui(transport.is_enabled(), |ui| {
            ui.horizontal(|ui| {
                self.playback_buttons(ui, coordinator, &mut events);
                ui.separator();

                let width = (ui.available_width() - 260.0).max(80.0);
                let size = Vec2::new(width, self.config.scrubber_height);
                self.scrubber(ui, coordinator, size, &mut events);
                ui.separator();

                self.playback_options(ui, coordinator, &mut events);
            });
        });
        events
    }

    fn playback_buttons(&self, ui: &mut egui::Ui, coordinator: &TimelineCoordinator, events: &mut Vec<PanelEvent>) {
        ui.style_mut().spacing.button_padding = Vec2::new(6.0, 4.0);
        ui.style_mut().spacing.item_spacing = Vec2::new(4.0, 0.0);

        let button = |ui: &mut egui::Ui, icon: &str, hint: &str| {
            ui.add_sized(
                [28.0, 28.0],
                egui::Button::new(egui::RichText::new(icon).size(15.0)).fill(Color32::from_gray(40)),
            )
            .on_hover_text(hint)
            .clicked()
        };

        if button(ui, "⏮", "Go to first frame (Home)") {
            events.push(PanelEvent::Action(TransportAction::SeekStart));
        }
        if button(ui, "◀", "Step backward (Left Arrow)") {
            events.push(PanelEvent::Action(TransportAction::StepBackward));
        }

        let transport = coordinator.transport();
        let (icon, fill) = if transport.is_playing() {
            ("⏸", Color32::from_rgb(220, 80, 80))
        } else {
            ("▶", Color32::from_rgb(76, 175, 80))
        };
        let toggle = ui.add_sized(
            [36.0, 28.0],
            egui::Button::new(egui::RichText::new(icon).size(18.0)).fill(fill),
        );
        if toggle.on_hover_text(format!("{} (Space)", transport.toggle_label())).clicked() {
            events.push(PanelEvent::PlayPause);
        }

        if button(ui, "▶", "Step forward (Right Arrow)") {
            events.push(PanelEvent::Action(TransportAction::StepForward));
        }
        if button(ui, "⏭", "Go to last frame (End)") {
            events.push(PanelEvent::Action(TransportAction::SeekEnd));
        }
    }

    fn scrubber(&self, ui: &mut egui::Ui, coordinator: &TimelineCoordinator, size: Vec2, events: &mut Vec<PanelEvent>) {
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;
        let transport = coordinator.transport();

        painter.rect_filled(rect, Rounding::same(2.0), self.config.track_color);

        let position = (transport.position() / SCRUB_MAX) as f32;
        let head_x = rect.left() + position.clamp(0.0, 1.0) * rect.width();
        let played = Rect::from_min_max(rect.min, Pos2::new(head_x, rect.bottom()));
        painter.rect_filled(played, Rounding::same(2.0), self.config.played_color);
        painter.line_segment(
            [Pos2::new(head_x, rect.top()), Pos2::new(head_x, rect.bottom())],
            Stroke::new(2.0, self.config.playhead_color),
        );

        if response.clicked() || response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                events.push(PanelEvent::Scrub(scrub_value(pointer.x, rect)));
            }
        }

        if let Some(hover) = response.hover_pos() {
            if let TransportAction::Seek(frame) = transport.scrub(scrub_value(hover.x, rect)) {
                ui.ctx().debug_painter().text(
                    hover + Vec2::new(0.0, -20.0),
                    Align2::CENTER_BOTTOM,
                    format!("Frame {frame}"),
                    FontId::proportional(12.0),
                    ui.style().visuals.text_color(),
                );
            }
        }
    }

    fn playback_options(&mut self, ui: &mut egui::Ui, coordinator: &TimelineCoordinator, events: &mut Vec<PanelEvent>) {
        ui.label(
            egui::RichText::new(format!(
                "Frame {} / {}",
                coordinator.current_frame(),
                coordinator.frame_count()
            ))
            .strong(),
        );

        ui.label("Speed:");
        let speed = ui.add_sized(
            [50.0, 20.0],
            egui::DragValue::new(&mut self.speed)
                .speed(0.1)
                .clamp_range(0.1..=10.0)
                .suffix("x")
                .max_decimals(1),
        );
        if speed.changed() {
            events.push(PanelEvent::SetSpeed(self.speed));
        }

        let end = coordinator.end_behavior();
        let looping = end == PlaybackEnd::Loop;
        if ui
            .add(egui::SelectableLabel::new(looping, "🔁"))
            .on_hover_text("Loop playback")
            .clicked()
        {
            let next = if looping { PlaybackEnd::Continue } else { PlaybackEnd::Loop };
            events.push(PanelEvent::SetEnd(next));
        }
        let stop_at_end = end == PlaybackEnd::Pause;
        if ui
            .add(egui::SelectableLabel::new(stop_at_end, "⏹"))
            .on_hover_text("Pause on last frame")
            .clicked()
        {
            let next = if stop_at_end { PlaybackEnd::Continue } else { PlaybackEnd::Pause };
            events.push(PanelEvent::SetEnd(next));
        }
    }
}

/// Scrubber value in `[0, 100]` for a pointer x inside `rect`
fn scrub_value(pointer_x: f32, rect: Rect) -> f64 {
    if rect.width() <= 0.0 {
        return 0.0;
    }
    let normalized = ((pointer_x - rect.left()) / rect.width()).clamp(0.0, 1.0);
    f64::from(normalized) * SCRUB_MAX
}
