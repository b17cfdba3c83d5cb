use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – menu, scene strip, status
// ---------------------------------------------------------------------------

/// Render the top menu / scene navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        // ---- Scene strip: five numbered dots, clickable ----
        let current = state.selection.scene();
        for scene in crate::scene::Scene::ALL {
            let label = RichText::new(format!("● {}", scene.number()));
            if ui
                .selectable_label(scene == current, label)
                .on_hover_text(scene.title())
                .clicked()
            {
                state.selection.go_to_scene(scene);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} cars loaded, {} match the filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – the shared filters
// ---------------------------------------------------------------------------

/// Render the filter panel.  These combo boxes drive the same `Selection`
/// the scenes read, so a choice made here is reflected everywhere.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the option lists so the combo closures can mutate state.
    let manufacturers = dataset.manufacturers.clone();
    let years = dataset.years.clone();
    let origins = dataset.origins.clone();

    let mut changed = false;

    ui.strong("Manufacturer");
    let current = state
        .selection
        .manufacturer()
        .unwrap_or("All")
        .to_string();
    egui::ComboBox::from_id_salt("filter_manufacturer")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.manufacturer().is_none(), "All")
                .clicked()
            {
                state.selection.set_manufacturer(None);
                changed = true;
            }
            for name in &manufacturers {
                let is_current = state.selection.manufacturer() == Some(name.as_str());
                if ui.selectable_label(is_current, name).clicked() {
                    state.selection.set_manufacturer(Some(name.clone()));
                    changed = true;
                }
            }
        });

    ui.add_space(4.0);
    ui.strong("Year");
    let current = state
        .selection
        .year()
        .map_or_else(|| "All".to_string(), |y| y.to_string());
    egui::ComboBox::from_id_salt("filter_year")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.year().is_none(), "All")
                .clicked()
            {
                state.selection.set_year(None);
                changed = true;
            }
            for &year in &years {
                let is_current = state.selection.year() == Some(year);
                if ui.selectable_label(is_current, year.to_string()).clicked() {
                    state.selection.set_year(Some(year));
                    changed = true;
                }
            }
        });

    ui.add_space(4.0);
    ui.strong("Origin");
    let current = state.selection.origin().unwrap_or("All").to_string();
    egui::ComboBox::from_id_salt("filter_origin")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.origin().is_none(), "All")
                .clicked()
            {
                state.selection.set_origin(None);
                changed = true;
            }
            for origin in &origins {
                let is_current = state.selection.origin() == Some(origin.as_str());
                if ui.selectable_label(is_current, origin).clicked() {
                    state.selection.set_origin(Some(origin.clone()));
                    changed = true;
                }
            }
        });

    ui.add_space(8.0);
    if ui.button("Start over").clicked() {
        state.selection.reset();
        changed = true;
    }

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open car dataset")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} cars, years {:?}, origins {:?}",
                    dataset.len(),
                    dataset.years,
                    dataset.origins
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load dataset: {e}");
                state.status_message = Some(format!("Data unavailable: {e}"));
                state.loading = false;
            }
        }
    }
}
