//! Main application entry point

use anyhow::Result;
use eframe::egui;
use tracing::info;

mod app;
mod run;
mod session;

use app::SurveyChartsApp;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Survey Charts");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Light,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Survey Charts",
        options,
        Box::new(|cc| match SurveyChartsApp::new(cc) {
            Ok(app) => Box::new(app),
            Err(e) => {
                tracing::error!("Failed to start: {}", e);
                std::process::exit(1);
            }
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
