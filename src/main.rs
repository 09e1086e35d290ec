use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transition_explorer::app::ExplorerApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();
    info!("startup");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Global Energy Transition Explorer",
        options,
        Box::new(|cc| Box::new(ExplorerApp::new(cc))),
    )
    .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}
