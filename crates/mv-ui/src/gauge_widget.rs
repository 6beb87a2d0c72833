use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Rounding, Sense, Vec2};
use mv_core::TimeIndexed;
use mv_views::AnnotationBar;

use crate::canvas_painter::to_color32;

/// Horizontal bar gauge with the bar's name and two-decimal readout
pub fn annotation_gauge(ui: &mut egui::Ui, bar: &AnnotationBar, size: Vec2) -> Response {
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, Rounding::same(3.0), ui.style().visuals.extreme_bg_color);

    if let Some(target) = bar.gauge().target() {
        let fill = Rect::from_min_size(rect.min, Vec2::new(rect.width() * target.fill, rect.height()));
        painter.rect_filled(fill, Rounding::same(3.0), to_color32(target.color));
    }

    let text = bar.readout().target().map_or(bar.readout().text(), |target| target.text.as_str());
    let font = FontId::proportional(12.0);
    painter.text(
        Pos2::new(rect.left() + 6.0, rect.center().y),
        Align2::LEFT_CENTER,
        bar.name(),
        font.clone(),
        Color32::WHITE,
    );
    painter.text(
        Pos2::new(rect.right() - 6.0, rect.center().y),
        Align2::RIGHT_CENTER,
        text,
        font,
        Color32::WHITE,
    );

    let feature = bar.shown_feature().unwrap_or("-");
    response.on_hover_text(format!("{feature} @ frame {}", bar.current_frame()))
}
