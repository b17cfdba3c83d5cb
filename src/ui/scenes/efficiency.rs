use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::aggregate::{extent, group_average, GroupStat};
use crate::data::model::{Car, NumericField};
use crate::scene::Scene;

use super::{hp_mpg_scatter, nav_row, scene_header, stat_strip, SceneContext, SceneEvent};

const FIELDS: [NumericField; 4] = [
    NumericField::Mpg,
    NumericField::Horsepower,
    NumericField::Weight,
    NumericField::Acceleration,
];

// ---------------------------------------------------------------------------
// Scene 4 – efficiency by region
// ---------------------------------------------------------------------------

/// Average MPG per origin region, plus a power-vs-economy scatter restricted
/// to the selected region.  Clicking a bar selects the region.
pub fn show(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    scene_header(
        ui,
        Scene::Efficiency,
        "Compare fuel economy across regions, then drill into one region's \
         power/economy trade-off.",
    );

    let cars = &ctx.dataset.cars;
    if cars.is_empty() {
        super::empty_state(ui);
        return nav_row(ui, Scene::Efficiency);
    }

    let mut stats = group_average(cars, |c| c.origin.clone(), &FIELDS);
    stats.sort_by(|a, b| {
        b.mean(NumericField::Mpg)
            .total_cmp(&a.mean(NumericField::Mpg))
    });

    let selected = ctx.selection.origin();
    let mut event = bars(ui, ctx, &stats, selected);

    if let Some(origin) = selected {
        match stats.iter().find(|s| s.key == origin) {
            Some(stat) => detail_strip(ui, stat),
            None => {
                ui.label(format!("No cars match region \"{origin}\"."));
            }
        }
        if ui.button("All regions").clicked() {
            event = Some(SceneEvent::SetOrigin(None));
        }
    }

    scatter(ui, ctx, selected);

    nav_row(ui, Scene::Efficiency).or(event)
}

fn bars(
    ui: &mut Ui,
    ctx: &SceneContext<'_>,
    stats: &[GroupStat],
    selected: Option<&str>,
) -> Option<SceneEvent> {
    let bars: Vec<Bar> = stats
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let color = ctx.origin_colors.color_for(&stat.key);
            let dimmed = selected.is_some() && selected != Some(stat.key.as_str());
            Bar::new(i as f64, stat.mean(NumericField::Mpg))
                .name(&stat.key)
                .width(0.6)
                .fill(if dimmed { color.gamma_multiply(0.3) } else { color })
        })
        .collect();

    let labels: Vec<String> = stats.iter().map(|s| s.key.clone()).collect();
    let n = labels.len();

    let response = Plot::new("origin_bars")
        .x_axis_label("Region")
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
        .height(260.0)
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
    if selected == Some(key.as_str()) {
        Some(SceneEvent::SetOrigin(None))
    } else {
        Some(SceneEvent::SetOrigin(Some(key.clone())))
    }
}

/// Horsepower vs MPG within the selected region (or everything when no
/// region is selected).
fn scatter(ui: &mut Ui, ctx: &SceneContext<'_>, selected: Option<&str>) {
    ui.separator();
    match selected {
        Some(origin) => ui.strong(format!("{origin} cars: horsepower vs MPG")),
        None => ui.strong("All cars: horsepower vs MPG"),
    };

    let in_region: Vec<&Car> = ctx
        .dataset
        .cars
        .iter()
        .filter(|c| selected.is_none_or(|o| c.origin == o))
        .collect();

    if in_region.is_empty() {
        super::empty_state(ui);
        return;
    }

    let hp_max = extent(in_region.iter().copied(), NumericField::Horsepower)
        .map_or(1.0, |(_, hi)| hi);
    let mpg_max = extent(in_region.iter().copied(), NumericField::Mpg).map_or(1.0, |(_, hi)| hi);

    Plot::new("origin_scatter")
        .legend(Legend::default())
        .x_axis_label(NumericField::Horsepower.label())
        .y_axis_label(NumericField::Mpg.label())
        .include_x(0.0)
        .include_x(hp_max * 1.05)
        .include_y(0.0)
        .include_y(mpg_max * 1.05)
        .height(300.0)
        .show(ui, |plot_ui| {
            hp_mpg_scatter(
                plot_ui,
                in_region.iter().copied(),
                &ctx.dataset.origins,
                ctx.origin_colors,
                3.5,
            );
        });
}

fn detail_strip(ui: &mut Ui, stat: &GroupStat) {
    ui.strong(format!("{} regional analysis", stat.key));
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
