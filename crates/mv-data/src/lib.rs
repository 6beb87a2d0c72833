//! Data sources for the motion viewer
//!
//! Annotation files are parsed into [`AnnotationData`]; [`SeriesCursor`] reads
//! one feature of it along the timeline and [`MotionTrack`] stands in for an
//! externally parsed motion clip.

pub mod annotation;
pub mod motion;
pub mod series;

use thiserror::Error;

// Re-exports
pub use annotation::{AnnotationData, END_FRAME_KEY, START_FRAME_KEY};
pub use motion::MotionTrack;
pub use series::{ScalarSeriesSource, SeriesCursor};

/// Errors that can occur while ingesting data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Annotation document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Annotation '{0}' contains no numeric features")]
    NoFeatures(String),
}
