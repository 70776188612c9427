use eframe::egui;
use log::{error, info};

mod ui;

use ui::ContainerTrackerApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting Container Tracker");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 560.0])
            .with_title("Container Tracker")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Container Tracker",
        options,
        Box::new(|cc| match ContainerTrackerApp::new(cc) {
            Ok(app) => {
                info!("Container Tracker initialized");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to initialize app: {:#}", e);
                Err(format!("Failed to initialize app: {:#}", e).into())
            }
        }),
    )
}
