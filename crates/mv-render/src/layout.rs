use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Largest size with the rect's aspect ratio that fits inside the container.
/// Degenerate rects come back unchanged.
pub fn fit_rect_into_container(rect: Size, container: Size) -> Size {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return rect;
    }
    let ratio = (container.width / rect.width).min(container.height / rect.height);
    Size::new(rect.width * ratio, rect.height * ratio)
}
