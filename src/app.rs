use eframe::egui;

use crate::color::ColorMap;
use crate::state::AppState;
use crate::ui::scenes::{self, SceneContext, SceneEvent};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NarrativeApp {
    pub state: AppState,
}

impl NarrativeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Apply a renderer-requested change through the `Selection` setters and
    /// recompute the filtered view.  This is the only place events land.
    fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Go(scene) => self.state.selection.go_to_scene(scene),
            SceneEvent::SetManufacturer(m) => self.state.selection.set_manufacturer(m),
            SceneEvent::SetYear(y) => self.state.selection.set_year(y),
            SceneEvent::SetOrigin(o) => self.state.selection.set_origin(o),
            SceneEvent::SetExplorerView(view) => self.state.explorer_view = view,
            SceneEvent::ClearFilters => {
                self.state.selection.set_manufacturer(None);
                self.state.selection.set_year(None);
                self.state.selection.set_origin(None);
            }
            SceneEvent::Reset => self.state.selection.reset(),
        }
        self.state.refilter();
    }
}

impl eframe::App for NarrativeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu and scene strip ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: shared filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the current scene ----
        let event = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.state.loading {
                    ui.centered_and_justified(|ui| ui.heading("Loading car data…"));
                    return None;
                }

                let Some(dataset) = &self.state.dataset else {
                    ui.centered_and_justified(|ui| {
                        ui.heading("Data unavailable  (File → Open…)");
                    });
                    return None;
                };

                let origin_colors = ColorMap::new(&dataset.origins);
                let scene_ctx = SceneContext {
                    dataset,
                    visible: &self.state.visible_indices,
                    selection: &self.state.selection,
                    explorer_view: self.state.explorer_view,
                    origin_colors: &origin_colors,
                };
                scenes::show_scene(ui, &scene_ctx)
            })
            .inner;

        if let Some(event) = event {
            self.apply(event);
        }
    }
}
