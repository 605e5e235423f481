//! Student Grades vs Internet Access - desktop entry point.

use eframe::egui;
use grades_chart::config::{APP_TITLE, DEFAULT_LOG_FILTER, MIN_WINDOW_SIZE, WINDOW_SIZE};
use grades_chart::gui::GradesApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();
    info!("startup");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(GradesApp::new(cc)))),
    )
}
