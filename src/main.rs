mod app;
mod color;
mod data;
mod scene;
mod state;
mod ui;

use std::path::Path;

use app::NarrativeApp;
use eframe::egui;
use state::AppState;

/// The dataset loaded at startup; File → Open can point elsewhere.
const DATA_PATH: &str = "data/cars.json";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    match data::loader::load_file(Path::new(DATA_PATH)) {
        Ok(dataset) => {
            log::info!("loaded {} cars from {DATA_PATH}", dataset.len());
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("failed to load {DATA_PATH}: {e}");
            state.status_message = Some(format!("Data unavailable: {e}"));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Motor Narrative – The Evolution of Automobiles",
        options,
        Box::new(|_cc| Ok(Box::new(NarrativeApp::new(state)))),
    )
}
