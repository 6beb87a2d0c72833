//! Single-value bar gauge

use mv_render::Color;

/// Input scale of [`GaugeRenderer::set_value`]
pub const GAUGE_MAX: f64 = 100.0;

/// Live drawing target of a gauge
#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    /// Proportional fill in `[0, 1]`
    pub fill: f32,
    pub color: Color,
}

impl Default for BarElement {
    fn default() -> Self {
        Self {
            fill: 0.0,
            color: Color::STEEL_BLUE,
        }
    }
}

/// Bar gauge showing one value as a fraction of its track.
///
/// Value and color are remembered while detached and applied once a target
/// is attached.
#[derive(Debug, Clone)]
pub struct GaugeRenderer {
    value: f64,
    color: Color,
    target: Option<BarElement>,
}

impl GaugeRenderer {
    pub fn new(color: Color) -> Self {
        Self {
            value: 0.0,
            color,
            target: None,
        }
    }

    /// Attach a live drawing target
    pub fn attach(&mut self, target: BarElement) {
        self.target = Some(target);
        self.apply();
    }

    pub fn detach(&mut self) -> Option<BarElement> {
        self.target.take()
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Set the value on a `[0, 100]` scale
    pub fn set_value(&mut self, value: f64) {
        self.value = value / GAUGE_MAX;
        self.apply();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.apply();
    }

    /// Stored fraction, not clamped
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn target(&self) -> Option<&BarElement> {
        self.target.as_ref()
    }

    fn apply(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.fill = if self.value.is_nan() { 0.0 } else { self.value.clamp(0.0, 1.0) as f32 };
            target.color = self.color;
        }
    }
}

impl Default for GaugeRenderer {
    fn default() -> Self {
        Self::new(Color::STEEL_BLUE)
    }
}
