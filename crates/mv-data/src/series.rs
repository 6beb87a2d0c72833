//! Scalar series: one selectable feature of an annotation, read per frame

use std::sync::Arc;
use mv_core::{clamp_frame, TimeIndexed};

use crate::annotation::AnnotationData;

/// A time-indexed source backed by named scalar series
pub trait ScalarSeriesSource: TimeIndexed {
    /// Feature currently read by the source
    fn active_feature(&self) -> Option<&str>;

    /// Switch the active feature. Unknown keys leave the source inert.
    fn set_active_feature(&mut self, key: &str);

    /// Value of the active feature at `frame`, clamped into range
    fn value_at(&self, frame: usize) -> Option<f64>;

    /// Value at the current frame
    fn current_value(&self) -> Option<f64> {
        self.value_at(self.current_frame())
    }
}

/// Reads one feature of shared annotation data.
///
/// A cursor without data, or whose feature is missing, reports zero frames
/// and no values.
#[derive(Debug, Clone, Default)]
pub struct SeriesCursor {
    data: Option<Arc<AnnotationData>>,
    feature: Option<String>,
    frame: usize,
}

impl SeriesCursor {
    /// Cursor on the first feature of `data`
    pub fn new(data: Arc<AnnotationData>) -> Self {
        let feature = data.first_feature().map(str::to_owned);
        Self {
            data: Some(data),
            feature,
            frame: 0,
        }
    }

    pub fn with_feature(data: Arc<AnnotationData>, key: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            feature: Some(key.into()),
            frame: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&Arc<AnnotationData>> {
        self.data.as_ref()
    }

    /// Values of the active feature
    pub fn values(&self) -> Option<&[f64]> {
        let data = self.data.as_ref()?;
        data.feature(self.feature.as_deref()?)
    }

    /// Move to `frame`, clamped, and return the stored frame
    pub fn goto(&mut self, frame: usize) -> usize {
        self.frame = clamp_frame(frame, self.len());
        self.frame
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.values().map_or(0, <[f64]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TimeIndexed for SeriesCursor {
    fn name(&self) -> &str {
        self.data.as_deref().map_or("series", |data| data.name())
    }

    fn frame_count(&self) -> usize {
        self.len()
    }

    fn current_frame(&self) -> usize {
        self.frame
    }

    fn goto_frame(&mut self, frame: usize) {
        self.goto(frame);
    }

    fn select_feature(&mut self, key: &str) {
        self.set_active_feature(key);
    }
}

impl ScalarSeriesSource for SeriesCursor {
    fn active_feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    fn set_active_feature(&mut self, key: &str) {
        self.feature = Some(key.to_owned());
        self.frame = clamp_frame(self.frame, self.len());
    }

    fn value_at(&self, frame: usize) -> Option<f64> {
        let values = self.values()?;
        values.get(clamp_frame(frame, values.len())).copied()
    }
}
