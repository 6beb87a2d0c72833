use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Immediate-mode 2D surface with a path and a current style.
///
/// Coordinates are in surface pixels with the origin at the top-left corner.
pub trait Canvas2d: Send {
    /// Surface width and height
    fn size(&self) -> (f32, f32);

    /// Erase a rectangle
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Start a new path, discarding the previous one
    fn begin_path(&mut self);

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    /// Stroke the current path with the current stroke style and width
    fn stroke(&mut self);

    /// Draw text with the current fill style, font size and alignment
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    fn set_stroke_style(&mut self, color: Color);

    fn set_fill_style(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    fn set_font_size(&mut self, size: f32);

    fn set_text_align(&mut self, align: TextAlign);

    fn width(&self) -> f32 {
        self.size().0
    }

    fn height(&self) -> f32 {
        self.size().1
    }

    /// Erase the whole surface
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.clear_rect(0.0, 0.0, width, height);
    }
}
