use eframe::egui::{RichText, Ui};
use egui_plot::{PlotPoints, PlotUi, Points};

use crate::color::ColorMap;
use crate::data::model::{Car, CarDataset};
use crate::scene::{ExplorerView, Scene};
use crate::state::Selection;

pub mod efficiency;
pub mod explorer;
pub mod manufacturers;
pub mod overview;
pub mod year_trends;

// ---------------------------------------------------------------------------
// The renderer contract
// ---------------------------------------------------------------------------

/// Read-only inputs of one scene render.  Renderers never mutate state;
/// they return a [`SceneEvent`] and the app applies it through the
/// `Selection` setters.
pub struct SceneContext<'a> {
    pub dataset: &'a CarDataset,
    /// Indices passing every active filter (used by the Explorer scene and
    /// the header counts; the earlier scenes filter per-dimension instead).
    pub visible: &'a [usize],
    pub selection: &'a Selection,
    pub explorer_view: ExplorerView,
    /// Origin → colour, shared across scenes so regions keep their colour.
    pub origin_colors: &'a ColorMap,
}

impl SceneContext<'_> {
    /// The cars passing every active filter.
    pub fn visible_cars(&self) -> impl Iterator<Item = &Car> + '_ {
        self.visible.iter().map(|&i| &self.dataset.cars[i])
    }
}

/// A user-initiated change requested by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Go(Scene),
    SetManufacturer(Option<String>),
    SetYear(Option<i32>),
    SetOrigin(Option<String>),
    SetExplorerView(ExplorerView),
    /// Drop all three filters at once, keeping the current scene.
    ClearFilters,
    Reset,
}

/// Dispatch to the renderer bound to the current scene.
pub fn show_scene(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    match ctx.selection.scene() {
        Scene::Overview => overview::show(ui, ctx),
        Scene::Manufacturers => manufacturers::show(ui, ctx),
        Scene::YearTrends => year_trends::show(ui, ctx),
        Scene::Efficiency => efficiency::show(ui, ctx),
        Scene::Explorer => explorer::show(ui, ctx),
    }
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Scene heading plus one line of guidance.
pub(crate) fn scene_header(ui: &mut Ui, scene: Scene, blurb: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(scene.title());
        ui.label(blurb);
    });
    ui.separator();
}

/// A horizontal strip of labelled summary values.
pub(crate) fn stat_strip(ui: &mut Ui, stats: &[(&str, String)]) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, value) in stats {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.strong(value);
                    ui.label(RichText::new(*label).small());
                });
            });
        }
    });
}

/// Back / next navigation row.  Returns the requested scene change.
pub(crate) fn nav_row(ui: &mut Ui, scene: Scene) -> Option<SceneEvent> {
    let mut event = None;
    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        if let Some(back) = scene.back() {
            if ui.button(format!("← {}", back.title())).clicked() {
                event = Some(SceneEvent::Go(back));
            }
        }
        ui.with_layout(
            eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
            |ui: &mut Ui| {
                if let Some(next) = scene.next() {
                    if ui.button(format!("{} →", next.title())).clicked() {
                        event = Some(SceneEvent::Go(next));
                    }
                }
            },
        );
    });
    event
}

/// Scatter of horsepower vs fuel economy, one series per origin so the plot
/// legend doubles as the region legend.
pub(crate) fn hp_mpg_scatter<'a>(
    plot_ui: &mut PlotUi,
    cars: impl Iterator<Item = &'a Car>,
    origins: &[String],
    colors: &ColorMap,
    radius: f32,
) {
    let mut by_origin: Vec<Vec<[f64; 2]>> = vec![Vec::new(); origins.len()];
    for car in cars {
        if let Some(i) = origins.iter().position(|o| *o == car.origin) {
            by_origin[i].push([car.horsepower, car.mpg]);
        }
    }

    for (origin, points) in origins.iter().zip(by_origin) {
        if points.is_empty() {
            continue;
        }
        plot_ui.points(
            Points::new(PlotPoints::from(points))
                .name(origin)
                .color(colors.color_for(origin))
                .radius(radius),
        );
    }
}

/// Centered placeholder when the current filters match nothing.
pub(crate) fn empty_state(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No data matches the current filters");
    });
}
