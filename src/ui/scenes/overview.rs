use eframe::egui::Ui;
use egui_plot::{Legend, Plot};

use crate::data::aggregate::{extent, mean};
use crate::data::model::NumericField;
use crate::scene::Scene;

use super::{hp_mpg_scatter, nav_row, scene_header, stat_strip, SceneContext, SceneEvent};

// ---------------------------------------------------------------------------
// Scene 1 – dataset overview
// ---------------------------------------------------------------------------

/// Scatter of horsepower against fuel economy over the whole dataset, with a
/// summary strip.  No filters apply here; this is the establishing shot of
/// the story.
pub fn show(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    scene_header(
        ui,
        Scene::Overview,
        "Explore the relationship between engine power and fuel economy across regions.",
    );

    let cars = &ctx.dataset.cars;
    if cars.is_empty() {
        super::empty_state(ui);
        return nav_row(ui, Scene::Overview);
    }

    let avg_mpg = mean(cars, NumericField::Mpg).unwrap_or(0.0);
    let avg_hp = mean(cars, NumericField::Horsepower).unwrap_or(0.0);
    let year_range = match (cars.iter().map(|c| c.year).min(), cars.iter().map(|c| c.year).max()) {
        (Some(lo), Some(hi)) => format!("{lo} – {hi}"),
        _ => "—".to_string(),
    };

    stat_strip(
        ui,
        &[
            ("Total cars", cars.len().to_string()),
            ("Avg MPG", format!("{avg_mpg:.1}")),
            ("Avg Horsepower", format!("{avg_hp:.1}")),
            ("Years", year_range),
            ("Regions", ctx.dataset.origins.len().to_string()),
        ],
    );

    // Axis ranges from the data extents, zero-anchored like the original
    // story so the cloud's position reads honestly.
    let hp_max = extent(cars, NumericField::Horsepower).map_or(1.0, |(_, hi)| hi);
    let mpg_max = extent(cars, NumericField::Mpg).map_or(1.0, |(_, hi)| hi);

    Plot::new("overview_scatter")
        .legend(Legend::default())
        .x_axis_label(NumericField::Horsepower.label())
        .y_axis_label(NumericField::Mpg.label())
        .include_x(0.0)
        .include_x(hp_max * 1.05)
        .include_y(0.0)
        .include_y(mpg_max * 1.05)
        .height(420.0)
        .show(ui, |plot_ui| {
            hp_mpg_scatter(
                plot_ui,
                cars.iter(),
                &ctx.dataset.origins,
                ctx.origin_colors,
                3.0,
            );
        });

    ui.label(
        "More horsepower typically means lower fuel economy; European and \
         Japanese cars cluster in the efficient upper-left of the chart.",
    );

    nav_row(ui, Scene::Overview)
}
