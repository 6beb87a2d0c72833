//! eframe application shell

use std::path::PathBuf;
use std::sync::Arc;
use eframe::egui::{self, Context, Key, Ui, Vec2};
use parking_lot::Mutex;
use tracing::{error, info, warn};

use mv_core::{PlaybackToggled, SourceRegistered, TransportAction};
use mv_data::{AnnotationData, DataError};
use mv_render::Size;
use mv_ui::{annotation_gauge, paint_canvas, PanelEvent, TransportPanel};

use crate::viewer::Viewer;

type LoadOutcome = (PathBuf, Result<AnnotationData, DataError>);

pub struct MotionViewerApp {
    viewer: Viewer,
    runtime: tokio::runtime::Runtime,
    /// Finished background loads, drained on the UI thread
    inbox: Arc<Mutex<Vec<LoadOutcome>>>,
    panel: TransportPanel,
    status: Arc<Mutex<String>>,
}

impl MotionViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, viewer: Viewer, runtime: tokio::runtime::Runtime) -> Self {
        mv_ui::apply_theme(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        viewer.scheduler().set_waker(move || ctx.request_repaint());

        let status = Arc::new(Mutex::new(String::from("Open annotation files or load the demo")));
        let events = viewer.coordinator().events();
        let sink = status.clone();
        events.on(move |event: &SourceRegistered| {
            *sink.lock() = format!("{} ready, timeline has {} frames", event.key, event.global_frame_count);
        });
        let sink = status.clone();
        events.on(move |event: &PlaybackToggled| {
            *sink.lock() = if event.playing { "Playing".into() } else { "Paused".into() };
        });

        let speed = viewer.coordinator().playback_clock().speed();
        Self {
            viewer,
            runtime,
            inbox: Arc::new(Mutex::new(Vec::new())),
            panel: TransportPanel::new(speed),
            status,
        }
    }

    fn open_annotation_files(&mut self, ctx: &Context) {
        let Some(paths) = rfd::FileDialog::new().add_filter("Annotations", &["json"]).pick_files() else {
            return;
        };
        for path in paths {
            info!("Loading annotation file: {:?}", path);
            let inbox = self.inbox.clone();
            let ctx = ctx.clone();
            self.runtime.spawn(async move {
                let result = AnnotationData::load(&path).await;
                inbox.lock().push((path, result));
                ctx.request_repaint();
            });
        }
    }

    fn drain_inbox(&mut self) {
        let outcomes = std::mem::take(&mut *self.inbox.lock());
        for (path, result) in outcomes {
            match result {
                Ok(data) => {
                    self.viewer.add_annotation(data);
                }
                Err(e) => {
                    error!("Failed to load annotation file {:?}: {}", path, e);
                    *self.status.lock() = format!("Could not load {}: {e}", path.display());
                }
            }
        }
    }

    fn shortcuts(ctx: &Context) -> Vec<PanelEvent> {
        ctx.input(|i| {
            let mut events = Vec::new();
            if i.key_pressed(Key::Space) {
                events.push(PanelEvent::PlayPause);
            }
            if i.key_pressed(Key::ArrowLeft) {
                events.push(PanelEvent::Action(TransportAction::StepBackward));
            }
            if i.key_pressed(Key::ArrowRight) {
                events.push(PanelEvent::Action(TransportAction::StepForward));
            }
            if i.key_pressed(Key::Home) {
                events.push(PanelEvent::Action(TransportAction::SeekStart));
            }
            if i.key_pressed(Key::End) {
                events.push(PanelEvent::Action(TransportAction::SeekEnd));
            }
            events
        })
    }

    fn menu_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open annotations...").clicked() {
                        ui.close_menu();
                        self.open_annotation_files(ui.ctx());
                    }
                    if ui.button("Load demo annotation").clicked() {
                        self.viewer.add_annotation(crate::demo::demo_annotation());
                        ui.close_menu();
                    }
                    if ui.button("Load demo motion").clicked() {
                        self.viewer.load_demo_motion();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear annotations").clicked() {
                        if let Err(e) = self.viewer.clear_annotations() {
                            warn!("Failed to clear annotations: {e}");
                        }
                        ui.close_menu();
                    }
                });

                ui.separator();
                self.feature_selector(ui);
            });
        });
    }

    fn feature_selector(&mut self, ui: &mut Ui) {
        ui.label("Feature:");
        let current = self.viewer.coordinator().active_feature().map(str::to_owned);
        let mut selected = None;
        egui::ComboBox::from_id_source("feature")
            .selected_text(current.as_deref().unwrap_or("(first in file)"))
            .show_ui(ui, |ui| {
                for feature in self.viewer.features() {
                    let checked = current.as_deref() == Some(feature.as_str());
                    if ui.selectable_label(checked, feature.as_str()).clicked() {
                        selected = Some(feature.clone());
                    }
                }
            });
        if let Some(feature) = selected {
            self.viewer.select_feature(&feature);
        }
    }

    fn central(&mut self, ui: &mut Ui) {
        if self.viewer.coordinator().source_count() == 0 {
            ui.centered_and_justified(|ui| {
                ui.label("No data loaded. Use File > Open annotations... or load the demo.");
            });
            return;
        }

        if let Some(frame) = self.viewer.pose_frame() {
            ui.label(format!("Skeleton pose: frame {frame}"));
        }

        let available = ui.available_size();
        let container = Size::new(available.x, (available.y * 0.6).max(60.0));
        let fitted = self.viewer.fit_graph(container);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(fitted.width, fitted.height), egui::Sense::hover());
        ui.painter().rect_filled(rect, egui::Rounding::same(2.0), egui::Color32::WHITE);
        paint_canvas(ui.painter(), rect, self.viewer.graph().read().canvas());

        ui.add_space(8.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in self.viewer.annotations() {
                let width = ui.available_width();
                annotation_gauge(ui, &entry.bar.read(), Vec2::new(width, 22.0));
                ui.add_space(4.0);
            }
        });
    }
}

impl eframe::App for MotionViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_inbox();
        self.viewer.run_due_ticks();

        let mut events = Self::shortcuts(ctx);
        self.menu_bar(ctx);

        egui::TopBottomPanel::bottom("transport").show(ctx, |ui| {
            ui.add_space(4.0);
            events.extend(self.panel.ui(ui, self.viewer.coordinator()));
            ui.label(self.status.lock().as_str());
        });

        if let Err(e) = self.viewer.apply(&events) {
            warn!("Rejected transport input: {e}");
            *self.status.lock() = e.to_string();
        }

        egui::CentralPanel::default().show(ctx, |ui| self.central(ui));
    }
}
