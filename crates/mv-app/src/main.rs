//! Motion viewer entry point

use anyhow::Result;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mv_core::{ManualScheduler, SystemClock};

mod app;
mod config;
mod demo;
mod viewer;

use app::MotionViewerApp;
use config::ViewerConfig;
use viewer::Viewer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ViewerConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let viewer = Viewer::new(config, ManualScheduler::new(), SystemClock::new())?;

    info!("Starting motion viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([700.0, 450.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Motion Viewer",
        options,
        Box::new(move |cc| Box::new(MotionViewerApp::new(cc, viewer, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
