use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::data::aggregate::{group_average, manufacturer_of, GroupStat};
use crate::data::model::NumericField;
use crate::scene::Scene;

use super::{nav_row, scene_header, stat_strip, SceneContext, SceneEvent};

const FIELDS: [NumericField; 3] = [
    NumericField::Mpg,
    NumericField::Horsepower,
    NumericField::Weight,
];

// ---------------------------------------------------------------------------
// Scene 2 – average fuel economy by manufacturer
// ---------------------------------------------------------------------------

/// Bar chart of average MPG per manufacturer, descending.  Clicking a bar
/// selects that manufacturer (clicking it again deselects); the selection
/// carries into the Explorer scene.
pub fn show(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    scene_header(
        ui,
        Scene::Manufacturers,
        "Click a bar to select a manufacturer and see its details.",
    );

    let cars = &ctx.dataset.cars;
    if cars.is_empty() {
        super::empty_state(ui);
        return nav_row(ui, Scene::Manufacturers);
    }

    let mut stats = group_average(cars, |c| manufacturer_of(&c.name).to_string(), &FIELDS);
    stats.sort_by(|a, b| {
        b.mean(NumericField::Mpg)
            .total_cmp(&a.mean(NumericField::Mpg))
    });

    let selected = ctx.selection.manufacturer();
    let mut event = chart(ui, ctx, &stats, selected);

    if let Some(name) = selected {
        match stats.iter().find(|s| s.key == name) {
            Some(stat) => detail_strip(ui, stat),
            None => {
                // A selection can name a manufacturer absent from the data.
                ui.label(format!("No cars match manufacturer \"{name}\"."));
            }
        }
        if ui.button("All manufacturers").clicked() {
            event = Some(SceneEvent::SetManufacturer(None));
        }
    }

    nav_row(ui, Scene::Manufacturers).or(event)
}

fn chart(
    ui: &mut Ui,
    ctx: &SceneContext<'_>,
    stats: &[GroupStat],
    selected: Option<&str>,
) -> Option<SceneEvent> {
    let bars: Vec<Bar> = stats
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let color = ctx.origin_colors.color_for(dominant_origin(ctx, &stat.key));
            let dimmed = selected.is_some() && selected != Some(stat.key.as_str());
            Bar::new(i as f64, stat.mean(NumericField::Mpg))
                .name(&stat.key)
                .width(0.8)
                .fill(if dimmed { color.gamma_multiply(0.3) } else { color })
        })
        .collect();

    let labels: Vec<String> = stats.iter().map(|s| s.key.clone()).collect();
    let n = labels.len();

    let response = Plot::new("manufacturer_bars")
        .x_axis_label("Manufacturer")
        .y_axis_label("Average MPG")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .height(420.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));

            if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate().map(|p| p.x)
            } else {
                None
            }
        });

    let clicked_x = response.inner?;
    let i = clicked_x.round();
    if (clicked_x - i).abs() > 0.5 || i < 0.0 || i as usize >= n {
        return None;
    }

    let key = &stats[i as usize].key;
    // Clicking the selected bar toggles it off.
    if selected == Some(key.as_str()) {
        Some(SceneEvent::SetManufacturer(None))
    } else {
        Some(SceneEvent::SetManufacturer(Some(key.clone())))
    }
}

/// Origin of the manufacturer's first car, used to colour its bar.
fn dominant_origin<'a>(ctx: &'a SceneContext<'_>, manufacturer: &str) -> &'a str {
    ctx.dataset
        .cars
        .iter()
        .find(|c| manufacturer_of(&c.name) == manufacturer)
        .map(|c| c.origin.as_str())
        .unwrap_or("")
}

fn detail_strip(ui: &mut Ui, stat: &GroupStat) {
    ui.separator();
    ui.strong(format!("{} details", stat.key));
    stat_strip(
        ui,
        &[
            ("Total cars", stat.count.to_string()),
            ("Avg MPG", format!("{:.1}", stat.mean(NumericField::Mpg))),
            (
                "Avg Horsepower",
                format!("{:.1}", stat.mean(NumericField::Horsepower)),
            ),
            (
                "Avg Weight (lbs)",
                format!("{:.0}", stat.mean(NumericField::Weight)),
            ),
        ],
    );
}
