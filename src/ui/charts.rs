use chrono::NaiveDate;
use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::color::ColorMap;
use crate::settings;

// ---------------------------------------------------------------------------
// KPI sparkline
// ---------------------------------------------------------------------------

/// Small trend line under a KPI card. The series is a synthetic
/// placeholder, so the plot is deliberately minimal: no axes, no
/// interaction.
pub fn sparkline(ui: &mut Ui, id: &str, values: &[f64]) {
    if values.is_empty() {
        return;
    }
    let points: PlotPoints = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new(id)
        .height(settings::KPI_SPARKLINE_HEIGHT)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(settings::PRIMARY).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Bar chart (categorical x axis)
// ---------------------------------------------------------------------------

/// Vertical bar chart over labelled categories, one colour per category.
pub fn bar_chart(ui: &mut Ui, id: &str, entries: &[(String, f64)], colors: &ColorMap) {
    let labels: Vec<String> = entries.iter().map(|(l, _)| l.clone()).collect();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new(i as f64, *value)
                .width(0.6)
                .name(label)
                .fill(colors.color_for_label(label))
        })
        .collect();

    Plot::new(id)
        .height(settings::CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as isize;
            if mark.value.fract().abs() < f64::EPSILON && idx >= 0 && (idx as usize) < labels.len()
            {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Pie chart (polygon wedges)
// ---------------------------------------------------------------------------

/// Pie chart built from filled polygon wedges; the legend carries the
/// labels. Zero and negative slices are skipped.
pub fn pie_chart(ui: &mut Ui, id: &str, slices: &[(String, f64)], colors: &ColorMap) {
    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        ui.label("Not enough data.");
        return;
    }

    Plot::new(id)
        .height(settings::CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            let mut angle = std::f64::consts::FRAC_PI_2; // start at 12 o'clock
            for (label, value) in slices {
                if *value <= 0.0 {
                    continue;
                }
                let sweep = value / total * std::f64::consts::TAU;
                let mut points = vec![[0.0, 0.0]];
                let steps = (sweep / 0.05).ceil().max(2.0) as usize;
                for s in 0..=steps {
                    let a = angle - sweep * (s as f64 / steps as f64);
                    points.push([a.cos(), a.sin()]);
                }
                angle -= sweep;

                let color = colors.color_for_label(label);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(points))
                        .name(label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// One point of a scatter chart: position, legend group, optional bubble
/// weight (mapped to the marker radius).
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub group: String,
    pub weight: Option<f64>,
}

/// Scatter chart with per-group colours and optional bubble sizing.
pub fn scatter_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    points: &[ScatterPoint],
    colors: &ColorMap,
) {
    if points.is_empty() {
        ui.label("Not enough data.");
        return;
    }

    let max_weight = points
        .iter()
        .filter_map(|p| p.weight)
        .fold(0.0_f64, f64::max);

    Plot::new(id)
        .height(settings::CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label.to_string())
        .y_axis_label(y_label.to_string())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for p in points {
                let radius = match (p.weight, max_weight > 0.0) {
                    (Some(w), true) => 3.0 + (w / max_weight) as f32 * 6.0,
                    _ => 3.5,
                };
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .radius(radius)
                        .color(colors.color_for_label(&p.group))
                        .name(&p.group),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Timeline (horizontal date ranges)
// ---------------------------------------------------------------------------

/// One row of the engagement timeline.
pub struct TimelineRow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Color32,
}

/// Horizontal bars spanning each row's date range; x axis in days from the
/// earliest start, formatted back to dates.
pub fn timeline(ui: &mut Ui, id: &str, rows: &[TimelineRow]) {
    let Some(origin) = rows.iter().map(|r| r.start).min() else {
        ui.label("Not enough data.");
        return;
    };

    let labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let start = (row.start - origin).num_days() as f64;
            let end = (row.end - origin).num_days() as f64;
            Bar::new(i as f64, (end - start).max(1.0))
                .base_offset(start)
                .width(0.5)
                .name(&row.label)
                .fill(row.color)
        })
        .collect();

    Plot::new(id)
        .height(settings::CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let days = mark.value.round() as i64;
            (origin + chrono::Duration::days(days))
                .format("%Y-%m-%d")
                .to_string()
        })
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as isize;
            if mark.value.fract().abs() < f64::EPSILON && idx >= 0 && (idx as usize) < labels.len()
            {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}
