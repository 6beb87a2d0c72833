//! Replays a recorded canvas onto an egui painter

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};
use mv_render::{Canvas2d, Color, RecordingCanvas, Shape, TextAlign};

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.alpha_u8())
}

fn text_anchor(align: TextAlign) -> Align2 {
    match align {
        TextAlign::Left => Align2::LEFT_CENTER,
        TextAlign::Center => Align2::CENTER_CENTER,
        TextAlign::Right => Align2::RIGHT_CENTER,
    }
}

/// Maps canvas pixels into a screen rect, scaling both axes
fn to_screen(canvas_size: (f32, f32), rect: Rect, (x, y): (f32, f32)) -> Pos2 {
    let (width, height) = canvas_size;
    let sx = if width > 0.0 { rect.width() / width } else { 1.0 };
    let sy = if height > 0.0 { rect.height() / height } else { 1.0 };
    Pos2::new(rect.left() + x * sx, rect.top() + y * sy)
}

/// Draw every recorded shape inside `rect`. Shapes outside the surface are
/// clipped to it.
pub fn paint_canvas(painter: &Painter, rect: Rect, canvas: &RecordingCanvas) {
    let painter = painter.with_clip_rect(rect);
    let size = canvas.size();

    for shape in canvas.shapes() {
        match shape {
            Shape::Polyline { points, color, width } => {
                let points = points.into_iter().map(|point| to_screen(size, rect, point)).collect();
                painter.add(egui::Shape::line(points, Stroke::new(width, to_color32(color))));
            }
            Shape::Text {
                text,
                position,
                color,
                size: font_size,
                align,
            } => {
                painter.text(
                    to_screen(size, rect, position),
                    text_anchor(align),
                    text,
                    FontId::proportional(font_size),
                    to_color32(color),
                );
            }
        }
    }
}
