use eframe::egui;
use log::{debug, info};

use zenith::app::ZenithApp;
use zenith::privilege;

fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("logging initialized");
}

fn main() -> eframe::Result<()> {
    init_logging();
    info!("starting zenith");
    if !privilege::is_elevated() {
        info!("not elevated; protected items may fail to delete");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Zenith")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zenith",
        options,
        Box::new(|cc| Ok(Box::new(ZenithApp::new(cc)))),
    )
}
