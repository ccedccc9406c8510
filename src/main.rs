mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::KeywordGapApp;
use config::AnalysisConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AnalysisConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        AnalysisConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Keyword Gap – SEO Opportunity Finder",
        options,
        Box::new(|_cc| Ok(Box::new(KeywordGapApp::new(config)))),
    )
}
