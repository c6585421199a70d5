use chrono::NaiveDate;
use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::aggregate::frequency;
use crate::data::export::{export, ExportKind};
use crate::data::metrics::{self, Kpi};
use crate::data::model::{Dataset, FieldValue};
use crate::data::store::Department;
use crate::settings;
use crate::state::{AppState, View};
use crate::ui::charts::{self, ScatterPoint, TimelineRow};

// ---------------------------------------------------------------------------
// View dispatch
// ---------------------------------------------------------------------------

/// Render the selected view into the central panel.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    match state.selected_view {
        View::Overview => show_overview(ui, state),
        View::InformationTechnology => show_it_solutions(ui, state),
        View::HrSolutions => show_hr_staffing(ui, state),
        View::BusinessConsulting => show_business_consulting(ui, state),
        View::DataDigitization => show_data_ai_services(ui, state),
    }
}

fn view_header(ui: &mut Ui, dept: Department) {
    ui.heading(format!("{} {}", settings::department_icon(dept), dept.label()));
    ui.separator();
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn show_overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📊 Company Overview");
    ui.separator();

    let it = state.filtered(Department::ItSolutions);
    let hr = state.filtered(Department::HrStaffing);
    let consulting = state.filtered(Department::BusinessConsulting);
    let ai = state.filtered(Department::DataAiServices);

    kpi_row(ui, "overview", &metrics::overview_kpis(&it, &hr, &consulting, &ai));
    ui.separator();

    // Static sample breakdowns, not derived from the loaded records.
    let dept_revenue: Vec<(String, f64)> = Department::ALL
        .iter()
        .zip([1_200_000.0, 400_000.0, 600_000.0, 300_000.0])
        .map(|(d, v)| (d.label().to_string(), v))
        .collect();
    let dept_colors = ColorMap::from_pairs(
        Department::ALL.map(|d| (d.label(), settings::department_color(d))),
    );

    let project_status: Vec<(String, f64)> = [
        ("Completed", 45.0),
        ("In Progress", 32.0),
        ("Planning", 18.0),
        ("On Hold", 5.0),
    ]
    .iter()
    .map(|(l, v)| (l.to_string(), *v))
    .collect();
    let status_colors = ColorMap::from_labels(project_status.iter().map(|(l, _)| l.as_str()));

    ui.columns(2, |cols| {
        cols[0].strong("Revenue Distribution by Department");
        charts::pie_chart(&mut cols[0], "overview_revenue_pie", &dept_revenue, &dept_colors);

        cols[1].strong("Project Status Overview");
        charts::bar_chart(&mut cols[1], "overview_status_bar", &project_status, &status_colors);
    });

    ui.separator();
    ui.strong("🔽 Download Overview Data");

    let parts: Vec<(&str, &Dataset)> = [
        (Department::ItSolutions, &it),
        (Department::HrStaffing, &hr),
        (Department::BusinessConsulting, &consulting),
        (Department::DataAiServices, &ai),
    ]
    .into_iter()
    .filter(|(_, ds)| !ds.is_empty())
    .map(|(d, ds)| (d.file_stem(), ds))
    .collect();

    if parts.is_empty() {
        ui.label("No data available in overview to display or download.");
        return;
    }

    let combined = Dataset::concat(&parts);
    export_buttons(ui, state, &combined, "overview_data");
    details_table(ui, "overview_table", &combined);
}

// ---------------------------------------------------------------------------
// Information Technology
// ---------------------------------------------------------------------------

fn show_it_solutions(ui: &mut Ui, state: &mut AppState) {
    view_header(ui, Department::ItSolutions);
    let data = state.filtered(Department::ItSolutions);
    if data.is_empty() {
        ui.label("No IT data available.");
        return;
    }

    kpi_row(ui, "it", &metrics::it_kpis(&data));
    ui.separator();

    // Per-project completion bars.
    let progress: Vec<(String, f64)> = data
        .records
        .iter()
        .filter_map(|rec| {
            let name = rec.get("project_name")?.as_str()?.to_string();
            let pct = rec.get("completion_percentage")?.as_f64()?;
            Some((name, pct))
        })
        .collect();

    let tech = frequency_slices(&data, "technology");

    ui.columns(2, |cols| {
        cols[0].strong("Project Completion Progress");
        if progress.is_empty() {
            cols[0].label("Not enough data.");
        } else {
            let colors = ColorMap::from_labels(progress.iter().map(|(l, _)| l.as_str()));
            charts::bar_chart(&mut cols[0], "it_progress_bar", &progress, &colors);
        }

        cols[1].strong("Technology Stack Distribution");
        if tech.is_empty() {
            cols[1].label("Not enough data.");
        } else {
            let colors = ColorMap::from_labels(tech.iter().map(|(l, _)| l.as_str()));
            charts::pie_chart(&mut cols[1], "it_tech_pie", &tech, &colors);
        }
    });

    ui.separator();
    ui.strong("📋 Project Details");
    export_buttons(ui, state, &data, Department::ItSolutions.file_stem());
    details_table(ui, "it_table", &data);
}

// ---------------------------------------------------------------------------
// HR Solutions & Services
// ---------------------------------------------------------------------------

fn show_hr_staffing(ui: &mut Ui, state: &mut AppState) {
    view_header(ui, Department::HrStaffing);
    let data = state.filtered(Department::HrStaffing);
    if data.is_empty() {
        ui.label("No HR data available.");
        return;
    }

    kpi_row(ui, "hr", &metrics::hr_kpis(&data));
    ui.separator();

    let dept_counts = frequency_slices(&data, "department");
    let scatter = scatter_points(&data, "performance_score", "salary", "department", "experience_years");

    ui.columns(2, |cols| {
        cols[0].strong("Employee Distribution by Department");
        if dept_counts.is_empty() {
            cols[0].label("Not enough data.");
        } else {
            let colors = ColorMap::from_labels(dept_counts.iter().map(|(l, _)| l.as_str()));
            charts::bar_chart(&mut cols[0], "hr_dept_bar", &dept_counts, &colors);
        }

        cols[1].strong("Performance vs Salary Analysis");
        let colors = ColorMap::from_labels(scatter.iter().map(|p| p.group.as_str()));
        charts::scatter_chart(
            &mut cols[1],
            "hr_perf_scatter",
            "performance_score",
            "salary",
            &scatter,
            &colors,
        );
    });

    ui.separator();
    ui.strong("👤 Employee Details");
    export_buttons(ui, state, &data, Department::HrStaffing.file_stem());
    details_table(ui, "hr_table", &data);
}

// ---------------------------------------------------------------------------
// Business Consulting
// ---------------------------------------------------------------------------

fn show_business_consulting(ui: &mut Ui, state: &mut AppState) {
    view_header(ui, Department::BusinessConsulting);
    let data = state.filtered(Department::BusinessConsulting);
    if data.is_empty() {
        ui.label("No Consulting data available.");
        return;
    }

    kpi_row(ui, "consulting", &metrics::consulting_kpis(&data));
    ui.separator();

    let areas = frequency_slices(&data, "consulting_area");
    let timeline_rows = timeline_rows(&data);

    ui.columns(2, |cols| {
        cols[0].strong("Consulting Areas Distribution");
        if areas.is_empty() {
            cols[0].label("Not enough data.");
        } else {
            let colors = ColorMap::from_labels(areas.iter().map(|(l, _)| l.as_str()));
            charts::pie_chart(&mut cols[0], "consulting_area_pie", &areas, &colors);
        }

        cols[1].strong("Project Timeline");
        if timeline_rows.is_empty() {
            cols[1].label("Not enough data (needs start_date, end_date, client_name).");
        } else {
            charts::timeline(&mut cols[1], "consulting_timeline", &timeline_rows);
        }
    });

    ui.separator();
    ui.strong("📊 Consulting Projects");
    export_buttons(ui, state, &data, Department::BusinessConsulting.file_stem());
    details_table(ui, "consulting_table", &data);
}

// ---------------------------------------------------------------------------
// Data Digitization (AI & data services)
// ---------------------------------------------------------------------------

fn show_data_ai_services(ui: &mut Ui, state: &mut AppState) {
    view_header(ui, Department::DataAiServices);
    let data = state.filtered(Department::DataAiServices);
    if data.is_empty() {
        ui.label("No Data & AI Services data available.");
        return;
    }

    kpi_row(ui, "ai", &metrics::ai_kpis(&data));
    ui.separator();

    let services = frequency_slices(&data, "service_type");
    let scatter = scatter_points(&data, "data_volume_gb", "model_accuracy", "service_type", "automation_savings");

    ui.columns(2, |cols| {
        cols[0].strong("AI Service Types");
        if services.is_empty() {
            cols[0].label("Not enough data.");
        } else {
            let colors = ColorMap::from_labels(services.iter().map(|(l, _)| l.as_str()));
            charts::bar_chart(&mut cols[0], "ai_service_bar", &services, &colors);
        }

        cols[1].strong("Data Volume vs Model Accuracy");
        let colors = ColorMap::from_labels(scatter.iter().map(|p| p.group.as_str()));
        charts::scatter_chart(
            &mut cols[1],
            "ai_accuracy_scatter",
            "data_volume_gb",
            "model_accuracy",
            &scatter,
            &colors,
        );
    });

    ui.separator();
    ui.strong("🔬 AI Projects Details");
    export_buttons(ui, state, &data, Department::DataAiServices.file_stem());
    details_table(ui, "ai_table", &data);
}

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

/// Four KPI cards side by side, each with a sparkline underneath.
fn kpi_row(ui: &mut Ui, id_prefix: &str, kpis: &[Kpi]) {
    ui.columns(kpis.len(), |cols| {
        for (i, kpi) in kpis.iter().enumerate() {
            let col = &mut cols[i];
            col.label(RichText::new(kpi.label).small());
            col.label(RichText::new(&kpi.display).heading().strong());
            charts::sparkline(col, &format!("{id_prefix}_kpi_{i}"), &kpi.trend);
        }
    });
}

/// Frequency of a category column as chart slices.
fn frequency_slices(data: &Dataset, field: &str) -> Vec<(String, f64)> {
    frequency(data, field)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count as f64))
        .collect()
}

/// Scatter points from two numeric columns, grouped by a category column
/// and weighted by an optional numeric column.
fn scatter_points(
    data: &Dataset,
    x_field: &str,
    y_field: &str,
    group_field: &str,
    weight_field: &str,
) -> Vec<ScatterPoint> {
    data.records
        .iter()
        .filter_map(|rec| {
            let x = rec.get(x_field)?.as_f64()?;
            let y = rec.get(y_field)?.as_f64()?;
            let group = rec
                .get(group_field)
                .and_then(|v| v.as_str())
                .unwrap_or("record")
                .to_string();
            let weight = rec.get(weight_field).and_then(FieldValue::as_f64);
            Some(ScatterPoint { x, y, group, weight })
        })
        .collect()
}

/// Engagement timeline rows: records carrying start/end dates and a client
/// name, coloured by status.
fn timeline_rows(data: &Dataset) -> Vec<TimelineRow> {
    let statuses: Vec<&str> = data
        .unique_values
        .get("status")
        .map(|vals| vals.iter().filter_map(FieldValue::as_str).collect())
        .unwrap_or_default();
    let status_colors = ColorMap::from_labels(statuses);

    data.records
        .iter()
        .filter_map(|rec| {
            let label = rec.get("client_name")?.as_str()?.to_string();
            let start = parse_date(rec.get("start_date")?)?;
            let end = parse_date(rec.get("end_date")?)?;
            let color = rec
                .get("status")
                .and_then(|v| v.as_str())
                .map(|s| status_colors.color_for_label(s))
                .unwrap_or(settings::PRIMARY);
            Some(TimelineRow { label, start, end, color })
        })
        .collect()
}

fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?, "%Y-%m-%d").ok()
}

/// Details table with the dataset's columns; status cells get the
/// familiar pale tint.
fn details_table(ui: &mut Ui, id: &str, data: &Dataset) {
    ui.push_id(id, |ui| {
        let mut builder = TableBuilder::new(ui).striped(true).resizable(true);
        for _ in &data.column_names {
            builder = builder.column(Column::auto().at_least(60.0));
        }
        builder
            .header(22.0, |mut header| {
                for col in &data.column_names {
                    header.col(|ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, data.len(), |mut row| {
                    let rec = &data.records[row.index()];
                    for col in &data.column_names {
                        row.col(|ui| {
                            let text = rec.get(col).map(|v| v.to_string()).unwrap_or_default();
                            if col == "status" {
                                if let Some(bg) = settings::status_color(&text) {
                                    let rect = ui.max_rect();
                                    ui.painter().rect_filled(rect, 2.0, bg);
                                    ui.colored_label(Color32::BLACK, text);
                                    return;
                                }
                            }
                            ui.label(text);
                        });
                    }
                });
            });
    });
}

/// CSV and Excel download buttons for the given dataset. Failures are
/// recoverable: they are logged and surfaced in the top-bar status, never
/// propagated.
fn export_buttons(ui: &mut Ui, state: &mut AppState, data: &Dataset, file_stem: &str) {
    if data.is_empty() {
        ui.label("No data to download.");
        return;
    }
    ui.horizontal(|ui| {
        if ui.button("📥 Download CSV").clicked() {
            save_export(state, data, file_stem, ExportKind::Csv);
        }
        if ui.button("📥 Download Excel").clicked() {
            save_export(state, data, file_stem, ExportKind::Xlsx);
        }
    });
}

fn save_export(state: &mut AppState, data: &Dataset, file_stem: &str, kind: ExportKind) {
    let bytes = match export(data, kind) {
        Ok(bytes) => bytes,
        Err(e) => {
            // Encoder unavailable or failed: drop this export, keep rendering.
            log::error!("export of {file_stem} failed: {e}");
            state.status_message = Some(format!("Export failed: {e}"));
            return;
        }
    };

    let file_name = format!("{file_stem}.{}", kind.extension());
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save export")
        .set_file_name(&file_name)
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, &bytes) {
        Ok(()) => {
            log::info!("exported {} records to {}", data.len(), path.display());
            state.status_message = Some(format!(
                "Exported {} records to {}",
                data.len(),
                path.display()
            ));
        }
        Err(e) => {
            log::error!("writing {} failed: {e}", path.display());
            state.status_message = Some(format!("Export failed: {e}"));
        }
    }
}
