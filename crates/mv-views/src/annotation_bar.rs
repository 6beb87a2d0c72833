//! Gauge plus readout following one annotation feature

use std::sync::Arc;
use mv_core::TimeIndexed;
use mv_data::{AnnotationData, ScalarSeriesSource, SeriesCursor};
use mv_render::Color;

use crate::gauge::{GaugeRenderer, GAUGE_MAX};
use crate::readout::ValueReadout;

/// Shows the active feature's value at the current frame as a filled bar and
/// a two-decimal number
#[derive(Debug, Clone)]
pub struct AnnotationBar {
    series: SeriesCursor,
    gauge: GaugeRenderer,
    readout: ValueReadout,
}

impl AnnotationBar {
    pub fn new(data: Arc<AnnotationData>, color: Color) -> Self {
        Self::from_cursor(SeriesCursor::new(data), color)
    }

    pub fn from_cursor(series: SeriesCursor, color: Color) -> Self {
        Self {
            series,
            gauge: GaugeRenderer::new(color),
            readout: ValueReadout::new(),
        }
    }

    pub fn series(&self) -> &SeriesCursor {
        &self.series
    }

    pub fn gauge(&self) -> &GaugeRenderer {
        &self.gauge
    }

    pub fn gauge_mut(&mut self) -> &mut GaugeRenderer {
        &mut self.gauge
    }

    pub fn readout(&self) -> &ValueReadout {
        &self.readout
    }

    pub fn readout_mut(&mut self) -> &mut ValueReadout {
        &mut self.readout
    }

    /// Feature whose value is on display, `None` while the selected key is
    /// missing from this file and the bar still shows an older value
    pub fn shown_feature(&self) -> Option<&str> {
        if self.series.is_empty() {
            None
        } else {
            self.series.active_feature()
        }
    }

    fn refresh(&mut self) {
        if let Some(value) = self.series.current_value() {
            self.gauge.set_value(value * GAUGE_MAX);
            self.readout.set_value(value);
        }
    }
}

impl TimeIndexed for AnnotationBar {
    fn name(&self) -> &str {
        self.series.name()
    }

    fn frame_count(&self) -> usize {
        self.series.frame_count()
    }

    fn current_frame(&self) -> usize {
        self.series.frame()
    }

    fn goto_frame(&mut self, frame: usize) {
        self.series.goto(frame);
        self.refresh();
    }

    fn select_feature(&mut self, key: &str) {
        self.set_active_feature(key);
    }
}

impl ScalarSeriesSource for AnnotationBar {
    fn active_feature(&self) -> Option<&str> {
        self.series.active_feature()
    }

    fn set_active_feature(&mut self, key: &str) {
        self.series.set_active_feature(key);
        self.refresh();
    }

    fn value_at(&self, frame: usize) -> Option<f64> {
        self.series.value_at(frame)
    }
}
