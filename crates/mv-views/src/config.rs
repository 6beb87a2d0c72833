use serde::{Deserialize, Serialize};

/// Annotation graph surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub width: f32,
    pub height: f32,
    /// Stroke width of plotted lines
    pub line_width: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 200.0,
            line_width: 2.0,
        }
    }
}
