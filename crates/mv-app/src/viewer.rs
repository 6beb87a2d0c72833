//! Viewer state independent of the window: the coordinator and its sources

use std::sync::Arc;
use anyhow::Result;
use parking_lot::RwLock;
use tracing::info;

use mv_core::{share, ManualScheduler, SharedSource, SourceKey, TimelineCoordinator, WallClock};
use mv_data::AnnotationData;
use mv_render::{fit_rect_into_container, Canvas2d, Palette, Size};
use mv_ui::{apply_events, PanelEvent};
use mv_views::{AnnotationBar, BarElement, GraphLine, GraphRenderer, TextElement};

use crate::config::ViewerConfig;
use crate::demo::{demo_motion, PoseSlot};

pub const GRAPH_KEY: &str = "graph";
pub const MOTION_KEY: &str = "motion";

/// A loaded annotation file and its gauge
pub struct AnnotationEntry {
    pub key: SourceKey,
    pub bar: Arc<RwLock<AnnotationBar>>,
}

pub struct Viewer {
    config: ViewerConfig,
    coordinator: TimelineCoordinator,
    scheduler: ManualScheduler,
    graph: Arc<RwLock<GraphRenderer>>,
    graph_source: SharedSource,
    annotations: Vec<AnnotationEntry>,
    loaded: usize,
    palette: Palette,
    features: Vec<String>,
    pose: Option<PoseSlot>,
}

impl Viewer {
    pub fn new(config: ViewerConfig, scheduler: ManualScheduler, wall_clock: impl WallClock + 'static) -> Result<Self> {
        config.validate()?;
        let coordinator = TimelineCoordinator::new(&config.timeline, scheduler.clone(), wall_clock)?;
        let (graph, graph_source) = share(GraphRenderer::from_config(&config.graph));
        Ok(Self {
            config,
            coordinator,
            scheduler,
            graph,
            graph_source,
            annotations: Vec::new(),
            loaded: 0,
            palette: Palette::new(),
            features: Vec::new(),
            pose: None,
        })
    }

    pub fn coordinator(&self) -> &TimelineCoordinator {
        &self.coordinator
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn graph(&self) -> &Arc<RwLock<GraphRenderer>> {
        &self.graph
    }

    pub fn annotations(&self) -> &[AnnotationEntry] {
        &self.annotations
    }

    /// Union of feature names over every loaded file, in load order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Frame the demo skeleton was last posed at
    pub fn pose_frame(&self) -> Option<usize> {
        self.pose.as_ref().and_then(|pose| *pose.lock())
    }

    /// Plot a loaded annotation file and give it a gauge
    pub fn add_annotation(&mut self, data: AnnotationData) -> SourceKey {
        let data = Arc::new(data);
        self.loaded += 1;

        let mut line = GraphLine::new(data.clone(), self.palette.next_color()).with_line_width(self.config.graph.line_width);
        if let Some(feature) = self.coordinator.active_feature() {
            line.select_feature(feature);
        }
        self.graph.write().add_line(line);

        for name in data.feature_names() {
            if !self.features.iter().any(|known| known == name) {
                self.features.push(name.to_owned());
            }
        }

        let graph_key = SourceKey::new(GRAPH_KEY);
        if self.coordinator.source(&graph_key).is_none() {
            self.coordinator.register_source(Some(graph_key), self.graph_source.clone());
        }

        let mut bar = AnnotationBar::new(data.clone(), self.config.gauge_color);
        bar.gauge_mut().attach(BarElement::default());
        bar.readout_mut().attach(TextElement::default());
        let (bar, shared) = share(bar);

        let key = SourceKey::new(format!("annotation-{}:{}", self.loaded, data.name()));
        let key = self.coordinator.register_source(Some(key), shared);
        self.annotations.push(AnnotationEntry { key: key.clone(), bar });
        key
    }

    /// Remove every annotation file, its graph line and its gauge
    pub fn clear_annotations(&mut self) -> Result<()> {
        for entry in self.annotations.drain(..) {
            self.coordinator.unregister_source(&entry.key)?;
        }
        self.graph.write().clear_lines();
        let graph_key = SourceKey::new(GRAPH_KEY);
        if self.coordinator.source(&graph_key).is_some() {
            self.coordinator.unregister_source(&graph_key)?;
        }
        self.palette.rewind();
        self.features.clear();
        info!("Cleared annotations");
        Ok(())
    }

    /// Register the synthetic motion track, replacing any previous one
    pub fn load_demo_motion(&mut self) {
        let (track, pose) = demo_motion();
        let (_, shared) = share(track);
        self.coordinator.register_source(Some(SourceKey::new(MOTION_KEY)), shared);
        self.pose = Some(pose);
    }

    pub fn select_feature(&mut self, key: &str) {
        self.coordinator.set_active_feature(key);
    }

    pub fn apply(&mut self, events: &[PanelEvent]) -> Result<()> {
        apply_events(&mut self.coordinator, events)?;
        Ok(())
    }

    /// Run every frame callback that came due. Returns frames advanced.
    pub fn run_due_ticks(&mut self) -> usize {
        let mut advanced = 0;
        for handle in self.scheduler.take_due() {
            let now = self.coordinator.now_ms();
            advanced += self.coordinator.tick(handle, now);
        }
        advanced
    }

    /// Fit the graph surface into the space available for it
    pub fn fit_graph(&mut self, container: Size) -> Size {
        let preferred = Size::new(self.config.graph.width, self.config.graph.height);
        let fitted = fit_rect_into_container(preferred, container);
        let mut graph = self.graph.write();
        let (width, height) = graph.canvas().size();
        if (width - fitted.width).abs() > 0.5 || (height - fitted.height).abs() > 0.5 {
            graph.resize(fitted.width, fitted.height);
        }
        fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_core::{ManualClock, TimeIndexed, TransportAction};
    use mv_data::ScalarSeriesSource;
    use mv_render::LINE_PALETTE;

    fn viewer() -> (Viewer, ManualClock) {
        let clock = ManualClock::new();
        let viewer = Viewer::new(ViewerConfig::default(), ManualScheduler::new(), clock.clone()).unwrap();
        (viewer, clock)
    }

    fn annotation(name: &str, frames: usize) -> AnnotationData {
        AnnotationData::new(name)
            .with_feature("BODY", vec![0.25; frames])
            .with_feature("ARM", vec![0.75; frames / 2])
    }

    #[test]
    fn test_transport_disabled_until_first_source() {
        let (mut viewer, _) = viewer();
        assert!(!viewer.coordinator().transport().is_enabled());

        viewer.add_annotation(annotation("a", 10));
        assert!(viewer.coordinator().transport().is_enabled());
    }

    #[test]
    fn test_annotations_share_the_graph_and_palette() {
        let (mut viewer, _) = viewer();
        viewer.add_annotation(annotation("a", 40));
        viewer.add_annotation(annotation("b", 120));

        let graph = viewer.graph().read();
        assert_eq!(graph.lines().len(), 2);
        assert_eq!(graph.lines()[0].color(), LINE_PALETTE[0]);
        assert_eq!(graph.lines()[1].color(), LINE_PALETTE[1]);
        assert_eq!(graph.frame_span(), 120);
        drop(graph);

        assert_eq!(viewer.coordinator().frame_count(), 120);
        assert_eq!(viewer.annotations().len(), 2);
        assert_eq!(viewer.features(), ["BODY".to_string(), "ARM".to_string()]);
    }

    #[test]
    fn test_motion_track_extends_the_graph_span() {
        let (mut viewer, _) = viewer();
        viewer.add_annotation(annotation("a", 40));
        viewer.load_demo_motion();

        assert_eq!(viewer.coordinator().frame_count(), crate::demo::DEMO_MOTION_FRAMES);
        assert_eq!(viewer.graph().read().frame_span(), crate::demo::DEMO_MOTION_FRAMES);
        assert_eq!(viewer.pose_frame(), Some(0));
    }

    #[test]
    fn test_feature_selection_reaches_bars_and_late_lines() {
        let (mut viewer, _) = viewer();
        viewer.add_annotation(annotation("a", 10));
        viewer.select_feature("ARM");
        viewer.add_annotation(annotation("b", 30));

        for entry in viewer.annotations() {
            assert_eq!(entry.bar.read().active_feature(), Some("ARM"));
        }
        let graph = viewer.graph().read();
        assert!(graph.lines().iter().all(|line| line.series().active_feature() == Some("ARM")));
        assert_eq!(graph.frame_count(), 15);
    }

    #[test]
    fn test_due_ticks_advance_playback() {
        let (mut viewer, clock) = viewer();
        viewer.load_demo_motion();
        viewer.apply(&[PanelEvent::PlayPause]).unwrap();

        clock.set(100.0);
        assert_eq!(viewer.run_due_ticks(), 2);
        assert_eq!(viewer.coordinator().current_frame(), 2);
        assert_eq!(viewer.pose_frame(), Some(2));

        viewer.apply(&[PanelEvent::Action(TransportAction::StepBackward)]).unwrap();
        assert!(!viewer.coordinator().is_playing());
        assert_eq!(viewer.run_due_ticks(), 0);
        assert_eq!(viewer.coordinator().current_frame(), 1);
    }

    #[test]
    fn test_clear_annotations_drops_sources() {
        let (mut viewer, _) = viewer();
        viewer.load_demo_motion();
        viewer.add_annotation(annotation("a", 10));
        viewer.clear_annotations().unwrap();

        assert!(viewer.annotations().is_empty());
        assert!(viewer.features().is_empty());
        assert!(viewer.graph().read().lines().is_empty());
        assert_eq!(viewer.coordinator().source_count(), 1);

        viewer.add_annotation(annotation("b", 10));
        assert_eq!(viewer.graph().read().lines()[0].color(), LINE_PALETTE[0]);
    }

    #[test]
    fn test_fit_graph_keeps_aspect_ratio() {
        let (mut viewer, _) = viewer();
        let fitted = viewer.fit_graph(Size::new(400.0, 400.0));
        assert_eq!(fitted, Size::new(400.0, 100.0));
        assert_eq!(viewer.graph().read().canvas().size(), (400.0, 100.0));
    }
}
