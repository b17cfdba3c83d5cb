use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::mean;
use crate::data::model::{Car, NumericField};
use crate::scene::Scene;

use super::{nav_row, scene_header, stat_strip, SceneContext, SceneEvent};

/// The story years: early 70s, the oil crisis, late 70s, early 80s.
const KEY_YEARS: [i32; 4] = [1970, 1974, 1978, 1982];

const MPG_COLOR: Color32 = Color32::from_rgb(46, 139, 87);
const HP_COLOR: Color32 = Color32::from_rgb(178, 84, 84);

struct YearStat {
    year: i32,
    avg_mpg: f64,
    avg_hp: f64,
    avg_weight: f64,
    count: usize,
}

// ---------------------------------------------------------------------------
// Scene 3 – trends across the key story years
// ---------------------------------------------------------------------------

/// Average MPG and horsepower across the key years.  Clicking a marker
/// selects that year (clicking again deselects).
pub fn show(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    scene_header(
        ui,
        Scene::YearTrends,
        "Fuel economy climbs after the 1973 oil crisis while horsepower falls. \
         Click a point to select a year.",
    );

    let cars = &ctx.dataset.cars;
    let stats = year_stats(cars, &ctx.dataset.years);
    if stats.is_empty() {
        super::empty_state(ui);
        return nav_row(ui, Scene::YearTrends);
    }

    let selected = ctx.selection.year();
    let mut event = chart(ui, &stats, selected);

    if let Some(year) = selected {
        match stats.iter().find(|s| s.year == year) {
            Some(stat) => detail_strip(ui, stat),
            None => {
                ui.label(format!("No cars match year {year}."));
            }
        }
        if ui.button("All years").clicked() {
            event = Some(SceneEvent::SetYear(None));
        }
    }

    nav_row(ui, Scene::YearTrends).or(event)
}

/// Means per key year; years with no records are skipped.  When none of the
/// key years have data, the first four years present are used instead.
fn year_stats(cars: &[Car], all_years: &[i32]) -> Vec<YearStat> {
    let from = |years: &[i32]| -> Vec<YearStat> {
        years
            .iter()
            .filter_map(|&year| {
                let in_year: Vec<&Car> = cars.iter().filter(|c| c.year == year).collect();
                if in_year.is_empty() {
                    return None;
                }
                Some(YearStat {
                    year,
                    avg_mpg: mean(in_year.iter().copied(), NumericField::Mpg).unwrap_or(0.0),
                    avg_hp: mean(in_year.iter().copied(), NumericField::Horsepower).unwrap_or(0.0),
                    avg_weight: mean(in_year.iter().copied(), NumericField::Weight).unwrap_or(0.0),
                    count: in_year.len(),
                })
            })
            .collect()
    };

    let stats = from(&KEY_YEARS);
    if !stats.is_empty() {
        return stats;
    }
    let fallback: Vec<i32> = all_years.iter().take(4).copied().collect();
    from(&fallback)
}

fn chart(ui: &mut Ui, stats: &[YearStat], selected: Option<i32>) -> Option<SceneEvent> {
    let mpg_points: Vec<[f64; 2]> = stats.iter().map(|s| [f64::from(s.year), s.avg_mpg]).collect();
    let hp_points: Vec<[f64; 2]> = stats.iter().map(|s| [f64::from(s.year), s.avg_hp]).collect();

    let response = Plot::new("year_trends")
        .legend(Legend::default())
        .x_axis_label("Model year")
        .y_axis_label("Average value")
        .x_axis_formatter(|mark, _range| {
            let y = mark.value.round();
            if (mark.value - y).abs() < 1e-6 {
                format!("{}", y as i64)
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .height(420.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(mpg_points.clone()))
                    .name("Avg MPG")
                    .color(MPG_COLOR)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(hp_points.clone()))
                    .name("Avg Horsepower")
                    .color(HP_COLOR)
                    .width(2.0),
            );

            // Markers; the selected year's pair is drawn larger.
            for (series, color) in [(&mpg_points, MPG_COLOR), (&hp_points, HP_COLOR)] {
                for point in series.iter() {
                    let is_selected = selected == Some(point[0] as i32);
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![*point]))
                            .color(color)
                            .radius(if is_selected { 7.0 } else { 4.5 }),
                    );
                }
            }

            if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate().map(|p| p.x)
            } else {
                None
            }
        });

    let clicked_x = response.inner?;
    let nearest = stats
        .iter()
        .min_by(|a, b| {
            (f64::from(a.year) - clicked_x)
                .abs()
                .total_cmp(&(f64::from(b.year) - clicked_x).abs())
        })
        .map(|s| s.year)?;
    if (f64::from(nearest) - clicked_x).abs() > 1.0 {
        return None;
    }

    if selected == Some(nearest) {
        Some(SceneEvent::SetYear(None))
    } else {
        Some(SceneEvent::SetYear(Some(nearest)))
    }
}

fn detail_strip(ui: &mut Ui, stat: &YearStat) {
    ui.separator();
    ui.strong(format!("{} details", stat.year));
    stat_strip(
        ui,
        &[
            ("Total cars", stat.count.to_string()),
            ("Avg MPG", format!("{:.1}", stat.avg_mpg)),
            ("Avg Horsepower", format!("{:.1}", stat.avg_hp)),
            ("Avg Weight (lbs)", format!("{:.0}", stat.avg_weight)),
        ],
    );
}
