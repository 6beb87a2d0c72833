//! Viewer configuration

use std::path::Path;
use anyhow::{Context, Result};
use mv_core::TimelineConfig;
use mv_render::Color;
use mv_views::GraphConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "MOCAPVIEW_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub timeline: TimelineConfig,
    pub graph: GraphConfig,
    /// Fill color of annotation gauges
    pub gauge_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            graph: GraphConfig::default(),
            gauge_color: Color::rgb(76, 175, 80),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid viewer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Load the file named by `MOCAPVIEW_CONFIG`, or use defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::load(Path::new(&path))?;
                info!(path = ?path, "Loaded viewer config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.timeline.validate()?;
        anyhow::ensure!(
            self.graph.width > 0.0 && self.graph.height > 0.0,
            "Graph size must be positive, got {}x{}",
            self.graph.width,
            self.graph.height
        );
        Ok(())
    }
}
