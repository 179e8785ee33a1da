mod app;
mod color;
mod data;
mod error;
mod settings;
mod state;
mod ui;

use app::BikePandaApp;
use data::cache::DatasetCache;
use eframe::egui;
use settings::Settings;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // The startup dataset must load; anything else is fatal.
    let cache = DatasetCache::new(&settings.data_path);
    if let Err(e) = cache.dataset() {
        log::error!("{e:#}");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
    let state = AppState::new(cache, &settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Panda – Bike Sharing Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikePandaApp::new(state)))),
    )
}
