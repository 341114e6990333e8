mod app;
mod color;
mod dashboard;
mod data;
mod error;
mod settings;
mod state;
mod ui;

use app::RentExplorerApp;
use eframe::egui;
use settings::Settings;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Ignoring settings: {e:#}");
            Settings::default()
        }
    };
    // Defaults always parse; a bad file has already fallen back above.
    let palettes = match settings.palettes() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Invalid palette: {e:#}");
            return Ok(());
        }
    };

    let mut state = AppState::new(&settings, palettes);
    if let Some(path) = &settings.dataset {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rent Explorer – Rental Listings",
        options,
        Box::new(|_cc| Ok(Box::new(RentExplorerApp::new(state)))),
    )
}
