//! egui front end for the timeline
//!
//! Widgets read view state and report user input as [`PanelEvent`]s; nothing
//! here mutates the timeline directly except [`apply_events`].

pub mod canvas_painter;
pub mod gauge_widget;
pub mod theme;
pub mod transport_panel;

pub use canvas_painter::{paint_canvas, to_color32};
pub use gauge_widget::annotation_gauge;
pub use theme::{accent_color, apply_theme};
pub use transport_panel::{apply_events, PanelEvent, TransportPanel, TransportPanelConfig};
