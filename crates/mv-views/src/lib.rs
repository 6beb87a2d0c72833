//! Timeline views: gauges, value readouts and the annotation graph
//!
//! Every view here is a [`mv_core::TimeIndexed`] source, so the coordinator
//! drives them alongside motion tracks.

mod annotation_bar;
mod config;
mod gauge;
mod graph;
mod readout;

pub use annotation_bar::AnnotationBar;
pub use config::GraphConfig;
pub use gauge::{BarElement, GaugeRenderer, GAUGE_MAX};
pub use graph::{GraphLine, GraphRenderer, LABEL_OFFSET};
pub use readout::{TextElement, ValueReadout};
