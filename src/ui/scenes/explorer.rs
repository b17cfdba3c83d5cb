use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::{extent, mean};
use crate::data::model::{Car, NumericField};
use crate::scene::{ExplorerView, Scene};

use super::{scene_header, stat_strip, SceneContext, SceneEvent};

/// The dimensions shown by the parallel-coordinates and radar views.
const DIMENSIONS: [NumericField; 4] = [
    NumericField::Mpg,
    NumericField::Horsepower,
    NumericField::Weight,
    NumericField::Acceleration,
];

const GRID_COLOR: Color32 = Color32::from_gray(180);
const RADAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Scene 5 – free exploration of the filtered dataset
// ---------------------------------------------------------------------------

/// All three filters apply at once here, with three chart modes over the
/// result.  An empty result renders a message, never an error.
pub fn show(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    scene_header(
        ui,
        Scene::Explorer,
        "Combine manufacturer, year, and region filters, then switch views \
         to explore the matching cars.",
    );

    let mut event = controls(ui, ctx);
    ui.separator();

    let visible: Vec<&Car> = ctx.visible_cars().collect();
    ui.label(format!(
        "{} of {} cars match",
        visible.len(),
        ctx.dataset.len()
    ));

    if visible.is_empty() {
        super::empty_state(ui);
    } else {
        match ctx.explorer_view {
            ExplorerView::Scatter => scatter(ui, ctx, &visible),
            ExplorerView::ParallelCoordinates => parallel_coordinates(ui, ctx, &visible),
            ExplorerView::Radar => radar(ui, &visible),
        }

        summary(ui, &visible);
        top_performers(ui, &visible);
    }

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .button(format!("← {}", Scene::Efficiency.title()))
            .clicked()
        {
            event = Some(SceneEvent::Go(Scene::Efficiency));
        }
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui: &mut Ui| {
                if ui.button("Start over").clicked() {
                    event = Some(SceneEvent::Reset);
                }
            },
        );
    });

    event
}

// ---------------------------------------------------------------------------
// Filter and view-mode controls
// ---------------------------------------------------------------------------

fn controls(ui: &mut Ui, ctx: &SceneContext<'_>) -> Option<SceneEvent> {
    let mut event = None;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        // ---- Manufacturer ----
        let current = ctx.selection.manufacturer().unwrap_or("Manufacturer");
        egui::ComboBox::from_id_salt("explorer_manufacturer")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(ctx.selection.manufacturer().is_none(), "All")
                    .clicked()
                {
                    event = Some(SceneEvent::SetManufacturer(None));
                }
                for name in &ctx.dataset.manufacturers {
                    let is_current = ctx.selection.manufacturer() == Some(name.as_str());
                    if ui.selectable_label(is_current, name).clicked() {
                        event = Some(SceneEvent::SetManufacturer(Some(name.clone())));
                    }
                }
            });

        // ---- Year ----
        let current = ctx
            .selection
            .year()
            .map_or_else(|| "Year".to_string(), |y| y.to_string());
        egui::ComboBox::from_id_salt("explorer_year")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(ctx.selection.year().is_none(), "All")
                    .clicked()
                {
                    event = Some(SceneEvent::SetYear(None));
                }
                for &year in &ctx.dataset.years {
                    let is_current = ctx.selection.year() == Some(year);
                    if ui.selectable_label(is_current, year.to_string()).clicked() {
                        event = Some(SceneEvent::SetYear(Some(year)));
                    }
                }
            });

        // ---- Origin ----
        let current = ctx.selection.origin().unwrap_or("Origin");
        egui::ComboBox::from_id_salt("explorer_origin")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(ctx.selection.origin().is_none(), "All")
                    .clicked()
                {
                    event = Some(SceneEvent::SetOrigin(None));
                }
                for origin in &ctx.dataset.origins {
                    let is_current = ctx.selection.origin() == Some(origin.as_str());
                    if ui.selectable_label(is_current, origin).clicked() {
                        event = Some(SceneEvent::SetOrigin(Some(origin.clone())));
                    }
                }
            });

        ui.separator();

        // ---- View mode ----
        for view in ExplorerView::ALL {
            if ui
                .selectable_label(ctx.explorer_view == view, view.label())
                .clicked()
            {
                event = Some(SceneEvent::SetExplorerView(view));
            }
        }

        if ctx.selection.has_filters() && ui.small_button("Clear all").clicked() {
            event = Some(SceneEvent::ClearFilters);
        }
    });

    event
}

// ---------------------------------------------------------------------------
// Scatter – horsepower vs MPG, point size tracks weight
// ---------------------------------------------------------------------------

fn scatter(ui: &mut Ui, ctx: &SceneContext<'_>, cars: &[&Car]) {
    let (w_lo, w_hi) =
        extent(cars.iter().copied(), NumericField::Weight).unwrap_or((0.0, 0.0));
    let w_span = (w_hi - w_lo).max(f64::EPSILON);

    let hp_max =
        extent(cars.iter().copied(), NumericField::Horsepower).map_or(1.0, |(_, hi)| hi);
    let mpg_max = extent(cars.iter().copied(), NumericField::Mpg).map_or(1.0, |(_, hi)| hi);

    ui.strong("Horsepower vs MPG (point size = weight)");
    Plot::new("explorer_scatter")
        .legend(Legend::default())
        .x_axis_label(NumericField::Horsepower.label())
        .y_axis_label(NumericField::Mpg.label())
        .include_x(0.0)
        .include_x(hp_max * 1.05)
        .include_y(0.0)
        .include_y(mpg_max * 1.05)
        .height(380.0)
        .show(ui, |plot_ui| {
            // Per-car series: the radius varies per point, so points cannot
            // be batched the way the fixed-radius scatters are.
            let mut named: Vec<&str> = Vec::new();
            for car in cars {
                let radius = 2.0 + 5.0 * ((car.weight - w_lo) / w_span) as f32;
                let mut points = Points::new(PlotPoints::from(vec![[car.horsepower, car.mpg]]))
                    .color(ctx.origin_colors.color_for(&car.origin))
                    .radius(radius);
                // One legend entry per origin.
                if !named.contains(&car.origin.as_str()) {
                    named.push(car.origin.as_str());
                    points = points.name(&car.origin);
                }
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Parallel coordinates
// ---------------------------------------------------------------------------

fn parallel_coordinates(ui: &mut Ui, ctx: &SceneContext<'_>, cars: &[&Car]) {
    // Per-dimension extents; a zero-width extent pins the axis midway.
    let extents: Vec<(f64, f64)> = DIMENSIONS
        .iter()
        .map(|&field| extent(cars.iter().copied(), field).unwrap_or((0.0, 0.0)))
        .collect();

    let normalized = |car: &Car, dim: usize| -> f64 {
        let (lo, hi) = extents[dim];
        if (hi - lo).abs() < f64::EPSILON {
            0.5
        } else {
            (car.value(DIMENSIONS[dim]) - lo) / (hi - lo)
        }
    };

    ui.strong("Parallel coordinates across MPG, power, weight, and acceleration");
    Plot::new("explorer_parallel")
        .show_axes([false, false])
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(-0.1)
        .include_y(1.2)
        .height(380.0)
        .show(ui, |plot_ui| {
            // Vertical axis per dimension with its label on top.
            for (i, field) in DIMENSIONS.iter().enumerate() {
                let x = i as f64;
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[x, 0.0], [x, 1.0]]))
                        .color(GRID_COLOR)
                        .width(1.0),
                );
                plot_ui.text(Text::new(PlotPoint::new(x, 1.08), field.label()));
            }

            for car in cars {
                let points: Vec<[f64; 2]> = (0..DIMENSIONS.len())
                    .map(|dim| [dim as f64, normalized(car, dim)])
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(
                            ctx.origin_colors
                                .color_for(&car.origin)
                                .gamma_multiply(0.6),
                        )
                        .width(1.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Radar – normalized means of the four metrics
// ---------------------------------------------------------------------------

fn radar(ui: &mut Ui, cars: &[&Car]) {
    // Mean of each metric normalized by the metric's max over the filtered
    // set, so all four spokes share the 0..1 scale.
    let spokes: Vec<(NumericField, f64, f64)> = DIMENSIONS
        .iter()
        .map(|&field| {
            let avg = mean(cars.iter().copied(), field).unwrap_or(0.0);
            let max = extent(cars.iter().copied(), field).map_or(0.0, |(_, hi)| hi);
            let norm = if max.abs() < f64::EPSILON { 0.0 } else { avg / max };
            (field, avg, norm)
        })
        .collect();

    let angle = |i: usize| -> f64 {
        (i as f64) * std::f64::consts::TAU / spokes.len() as f64 - std::f64::consts::FRAC_PI_2
    };

    ui.strong("Average metrics radar (normalized to each metric's maximum)");
    Plot::new("explorer_radar")
        .show_axes([false, false])
        .show_grid(false)
        .data_aspect(1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.5)
        .include_x(1.5)
        .include_y(-1.4)
        .include_y(1.4)
        .height(420.0)
        .show(ui, |plot_ui| {
            // Concentric grid rings.
            for ring in 1..=5 {
                let r = f64::from(ring) / 5.0;
                let circle: Vec<[f64; 2]> = (0..=64)
                    .map(|k| {
                        let t = f64::from(k) / 64.0 * std::f64::consts::TAU;
                        [r * t.cos(), r * t.sin()]
                    })
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(circle))
                        .color(GRID_COLOR)
                        .width(0.5),
                );
            }

            // Spokes and labels.
            for (i, (field, _, _)) in spokes.iter().enumerate() {
                let a = angle(i);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], [a.cos(), a.sin()]]))
                        .color(GRID_COLOR)
                        .width(0.5),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(1.18 * a.cos(), 1.18 * a.sin()),
                    field.label(),
                ));
            }

            // The polygon of normalized means.
            let vertices: Vec<[f64; 2]> = spokes
                .iter()
                .enumerate()
                .map(|(i, (_, _, norm))| {
                    let a = angle(i);
                    [norm * a.cos(), norm * a.sin()]
                })
                .collect();
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vertices.clone()))
                    .fill_color(Color32::from_rgba_unmultiplied(70, 130, 180, 70))
                    .stroke(Stroke::new(2.0, RADAR_COLOR)),
            );

            // Vertex markers with the raw averages.
            for (vertex, (_, avg, _)) in vertices.iter().zip(&spokes) {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![*vertex]))
                        .color(RADAR_COLOR)
                        .radius(4.0),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(vertex[0] * 1.15, vertex[1] * 1.15 - 0.06),
                    format!("{avg:.1}"),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Summary strip and top performers
// ---------------------------------------------------------------------------

fn summary(ui: &mut Ui, cars: &[&Car]) {
    let avg = |field| mean(cars.iter().copied(), field).unwrap_or(0.0);
    stat_strip(
        ui,
        &[
            ("Total cars", cars.len().to_string()),
            ("Avg MPG", format!("{:.1}", avg(NumericField::Mpg))),
            (
                "Avg Horsepower",
                format!("{:.1}", avg(NumericField::Horsepower)),
            ),
            (
                "Avg Weight (lbs)",
                format!("{:.0}", avg(NumericField::Weight)),
            ),
        ],
    );
}

fn top_performers(ui: &mut Ui, cars: &[&Car]) {
    ui.separator();
    ui.strong("Top performers");
    ui.columns(3, |columns: &mut [Ui]| {
        ranked(&mut columns[0], "Most efficient", cars, |a, b| {
            b.mpg.total_cmp(&a.mpg)
        }, |c| format!("{} ({:.0} MPG)", c.name, c.mpg));
        ranked(&mut columns[1], "Most powerful", cars, |a, b| {
            b.horsepower.total_cmp(&a.horsepower)
        }, |c| format!("{} ({:.0} HP)", c.name, c.horsepower));
        ranked(&mut columns[2], "Quickest 0–60", cars, |a, b| {
            a.acceleration.total_cmp(&b.acceleration)
        }, |c| format!("{} ({:.1}s)", c.name, c.acceleration));
    });
}

fn ranked(
    ui: &mut Ui,
    title: &str,
    cars: &[&Car],
    order: impl Fn(&Car, &Car) -> std::cmp::Ordering,
    describe: impl Fn(&Car) -> String,
) {
    let mut sorted: Vec<&Car> = cars.to_vec();
    sorted.sort_by(|a, b| order(a, b));
    ui.label(egui::RichText::new(title).strong());
    for car in sorted.iter().take(3) {
        ui.label(describe(car));
    }
}
