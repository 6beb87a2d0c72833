//! 2D drawing abstraction for the timeline views
//!
//! Views draw through [`Canvas2d`]. [`RecordingCanvas`] keeps the issued
//! commands so a UI layer can replay them and tests can inspect them.

mod canvas;
mod color;
mod layout;
mod recording;

pub use canvas::{Canvas2d, TextAlign};
pub use color::{Color, Palette, LINE_PALETTE};
pub use layout::{fit_rect_into_container, Size};
pub use recording::{DrawCommand, RecordingCanvas, Shape};
