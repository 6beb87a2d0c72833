use tracing::debug;

use crate::canvas::{Canvas2d, TextAlign};
use crate::color::Color;

/// One call made against a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Stroke,
    FillText { text: String, x: f32, y: f32 },
    StrokeStyle(Color),
    FillStyle(Color),
    LineWidth(f32),
    FontSize(f32),
    Align(TextAlign),
}

/// A drawable primitive with its style resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polyline {
        points: Vec<(f32, f32)>,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        position: (f32, f32),
        color: Color,
        size: f32,
        align: TextAlign,
    },
}

/// Canvas that records commands since the last full clear
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Change the surface size. Like an HTML canvas, resizing wipes it.
    pub fn resize(&mut self, width: f32, height: f32) {
        if (width, height) != (self.width, self.height) {
            debug!(width, height, "Resizing canvas");
        }
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every `fill_text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Resolve the recorded commands into styled shapes for replay.
    /// Partial clears are not representable and are skipped.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::new();
        let mut stroke_style = Color::BLACK;
        let mut fill_style = Color::BLACK;
        let mut line_width = 1.0;
        let mut font_size = 10.0;
        let mut align = TextAlign::Left;
        let mut path: Vec<Vec<(f32, f32)>> = Vec::new();

        for command in &self.commands {
            match command {
                DrawCommand::ClearRect { .. } => {}
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo(x, y) => path.push(vec![(*x, *y)]),
                DrawCommand::LineTo(x, y) => match path.last_mut() {
                    Some(subpath) => subpath.push((*x, *y)),
                    None => path.push(vec![(*x, *y)]),
                },
                DrawCommand::Stroke => {
                    for subpath in path.iter().filter(|subpath| subpath.len() > 1) {
                        shapes.push(Shape::Polyline {
                            points: subpath.clone(),
                            color: stroke_style,
                            width: line_width,
                        });
                    }
                }
                DrawCommand::FillText { text, x, y } => shapes.push(Shape::Text {
                    text: text.clone(),
                    position: (*x, *y),
                    color: fill_style,
                    size: font_size,
                    align,
                }),
                DrawCommand::StrokeStyle(color) => stroke_style = *color,
                DrawCommand::FillStyle(color) => fill_style = *color,
                DrawCommand::LineWidth(width) => line_width = *width,
                DrawCommand::FontSize(size) => font_size = *size,
                DrawCommand::Align(a) => align = *a,
            }
        }
        shapes
    }
}

impl Canvas2d for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let covers_surface = x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height;
        if covers_surface {
            self.commands.clear();
        } else {
            self.commands.push(DrawCommand::ClearRect { x, y, width, height });
        }
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillStyle(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_font_size(&mut self, size: f32) {
        self.commands.push(DrawCommand::FontSize(size));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::Align(align));
    }
}
