//! Annotation graph: normalized line plots on a shared canvas
//!
//! All lines share one horizontal span, normally the coordinator's global
//! frame count, so a short series plots compressed against the full timeline.
//! The value axis is fixed to `[0, 1]` and values outside it are drawn as-is.

use std::sync::Arc;
use mv_core::{clamp_frame, TimeIndexed};
use mv_data::{AnnotationData, ScalarSeriesSource, SeriesCursor};
use mv_render::{Canvas2d, Color, RecordingCanvas, TextAlign};
use tracing::debug;

use crate::config::GraphConfig;
use crate::readout::format_value;

/// Vertical distance between a plotted point and its value label
pub const LABEL_OFFSET: f32 = 12.0;

const AXIS_FONT_SIZE: f32 = 18.0;
const LABEL_FONT_SIZE: f32 = 14.0;
const AXIS_LABEL_X: f32 = 14.0;
const AXIS_LABEL_INSET: f32 = 10.0;
const CURSOR_LABEL_GAP: f32 = 4.0;

/// One plotted series
#[derive(Debug, Clone)]
pub struct GraphLine {
    series: SeriesCursor,
    color: Color,
    line_width: f32,
}

impl GraphLine {
    pub fn new(data: Arc<AnnotationData>, color: Color) -> Self {
        Self {
            series: SeriesCursor::new(data),
            color,
            line_width: GraphConfig::default().line_width,
        }
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn series(&self) -> &SeriesCursor {
        &self.series
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn frame_count(&self) -> usize {
        self.series.frame_count()
    }

    pub fn select_feature(&mut self, key: &str) {
        self.series.set_active_feature(key);
    }
}

/// Draws every line against a shared frame span, plus a cursor at the
/// current frame
#[derive(Debug)]
pub struct GraphRenderer<C = RecordingCanvas> {
    canvas: C,
    lines: Vec<GraphLine>,
    frame_span: usize,
    frame: usize,
}

impl GraphRenderer<RecordingCanvas> {
    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(RecordingCanvas::new(config.width, config.height))
    }

    /// Resize the surface and draw everything again at the current frame
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.resize(width, height);
        let frame = self.frame;
        self.goto_frame(frame);
    }
}

impl<C: Canvas2d> GraphRenderer<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            lines: Vec::new(),
            frame_span: 0,
            frame: 0,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn lines(&self) -> &[GraphLine] {
        &self.lines
    }

    pub fn frame_span(&self) -> usize {
        self.frame_span
    }

    /// Add a line; the span grows to cover it and never shrinks here
    pub fn add_line(&mut self, line: GraphLine) {
        self.frame_span = self.frame_span.max(line.frame_count());
        debug!(line = line.series.name(), span = self.frame_span, "Added graph line");
        self.lines.push(line);
    }

    /// Remove every line and reset the span
    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.frame_span = 0;
    }

    pub fn set_frame_span(&mut self, frame_span: usize) {
        self.frame_span = frame_span;
    }

    /// Clear the surface and stroke every line, then the axis labels
    pub fn redraw(&mut self) {
        self.canvas.clear();
        let (width, height) = self.canvas.size();

        for line in &self.lines {
            let Some(values) = line.series.values() else {
                continue;
            };
            self.canvas.begin_path();
            self.canvas.set_stroke_style(line.color);
            self.canvas.set_line_width(line.line_width);
            for (index, value) in values.iter().enumerate() {
                let x = span_x(index, self.frame_span, width);
                let y = value_y(*value, height);
                if index == 0 {
                    self.canvas.move_to(x, y);
                } else {
                    self.canvas.line_to(x, y);
                }
            }
            self.canvas.stroke();
        }

        self.canvas.set_font_size(AXIS_FONT_SIZE);
        self.canvas.set_fill_style(Color::BLACK);
        self.canvas.set_text_align(TextAlign::Right);
        self.canvas.fill_text("1", AXIS_LABEL_X, AXIS_LABEL_INSET);
        self.canvas.fill_text("0", AXIS_LABEL_X, height - AXIS_LABEL_INSET);
    }

    fn draw_cursor(&mut self, frame: usize) {
        let (width, height) = self.canvas.size();
        let x = span_x(frame, self.frame_span, width);

        self.canvas.begin_path();
        self.canvas.set_stroke_style(Color::BLACK);
        self.canvas.set_line_width(1.0);
        self.canvas.move_to(x, 0.0);
        self.canvas.line_to(x, height);
        self.canvas.stroke();

        self.canvas.set_font_size(LABEL_FONT_SIZE);
        self.canvas.set_text_align(TextAlign::Left);
        for line in &self.lines {
            let Some(value) = line.series.value_at(frame) else {
                continue;
            };
            self.canvas.set_fill_style(line.color);
            let label_y = label_y(value_y(value, height), height);
            self.canvas.fill_text(&format_value(value), x + CURSOR_LABEL_GAP, label_y);
        }
    }
}

impl<C: Canvas2d + Sync> TimeIndexed for GraphRenderer<C> {
    fn name(&self) -> &str {
        "graph"
    }

    /// Longest line
    fn frame_count(&self) -> usize {
        self.lines.iter().map(GraphLine::frame_count).max().unwrap_or(0)
    }

    fn current_frame(&self) -> usize {
        self.frame
    }

    fn goto_frame(&mut self, frame: usize) {
        self.frame = clamp_frame(frame, self.frame_span.max(self.frame_count()));
        self.redraw();
        self.draw_cursor(self.frame);
    }

    fn select_feature(&mut self, key: &str) {
        for line in &mut self.lines {
            line.select_feature(key);
        }
        let frame = self.frame;
        self.goto_frame(frame);
    }

    fn sync_frame_span(&mut self, span: usize) {
        self.set_frame_span(span);
    }
}

fn span_x(index: usize, frame_span: usize, width: f32) -> f32 {
    if frame_span == 0 {
        0.0
    } else {
        index as f32 / frame_span as f32 * width
    }
}

fn value_y(value: f64, height: f32) -> f32 {
    height - value as f32 * height
}

/// Label sits above its point unless that would leave the surface
fn label_y(point_y: f32, height: f32) -> f32 {
    if point_y >= height {
        height - LABEL_OFFSET
    } else if point_y - LABEL_OFFSET <= 0.0 {
        point_y + LABEL_OFFSET
    } else {
        point_y - LABEL_OFFSET
    }
}
