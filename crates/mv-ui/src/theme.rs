//! Dark theme for the viewer window

use egui::{Color32, Context, Rounding, Stroke, Visuals};

/// Highlight color shared by the transport and the selection
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

pub fn apply_theme(ctx: &Context) {
    let mut visuals = Visuals::dark();

    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let text_color = Color32::from_rgb(220, 220, 220);

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = Color32::from_rgb(23, 23, 23);
    visuals.faint_bg_color = widget_bg;

    for widgets in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
    ] {
        widgets.fg_stroke = Stroke::new(1.0, text_color);
        widgets.rounding = Rounding::same(4.0);
    }
    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 50, 50);
    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 60, 60);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.visuals = visuals;
    ctx.set_style(style);
}
