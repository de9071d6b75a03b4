#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod board;
mod config;
mod error;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("siteboard=info")),
        )
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 900.0])
        .with_min_inner_size([900.0, 700.0])
        .with_title("Siteboard");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Siteboard",
        options,
        Box::new(|cc| Ok(Box::new(ui::SiteboardApp::new(cc)?))),
    )
}
