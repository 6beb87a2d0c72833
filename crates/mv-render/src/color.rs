use serde::{Deserialize, Serialize};

/// RGBA color, alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a byte, for premultiplying UI backends
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Graph line colors, assigned to annotation files in load order
pub const LINE_PALETTE: [Color; 10] = [
    Color::rgba(31, 119, 180, 1.0),
    Color::rgba(255, 127, 14, 0.9),
    Color::rgba(44, 160, 44, 0.8),
    Color::rgba(214, 39, 40, 0.7),
    Color::rgba(148, 103, 189, 0.6),
    Color::rgba(140, 86, 75, 0.5),
    Color::rgba(227, 119, 194, 0.4),
    Color::rgba(127, 127, 127, 0.3),
    Color::rgba(188, 189, 34, 0.2),
    Color::rgba(23, 190, 207, 0.1),
];

/// Cycles through [`LINE_PALETTE`]
#[derive(Debug, Clone, Default)]
pub struct Palette {
    next: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> Color {
        let color = LINE_PALETTE[self.next];
        self.next = (self.next + 1) % LINE_PALETTE.len();
        color
    }

    /// Start again from the first color
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        let mut palette = Palette::new();
        let first = palette.next_color();
        for _ in 1..LINE_PALETTE.len() {
            palette.next_color();
        }
        assert_eq!(palette.next_color(), first);

        palette.next_color();
        palette.rewind();
        assert_eq!(palette.next_color(), LINE_PALETTE[0]);
    }

    #[test]
    fn test_color_deserializes_from_json() {
        let color: Color = serde_json::from_str(r#"{"r": 255, "g": 127, "b": 14, "a": 0.5}"#).unwrap();
        assert_eq!(color, Color::rgba(255, 127, 14, 0.5));
        assert_eq!(color.alpha_u8(), 128);
    }
}
