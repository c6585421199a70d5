use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::store::Department;
use crate::settings;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filters
// ---------------------------------------------------------------------------

/// Render the sidebar: view selector, date range, record bound and the
/// department filter.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📋 Navigation");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::ComboBox::from_label("Select View")
                .selected_text(state.selected_view.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for view in View::ALL {
                        ui.selectable_value(&mut state.selected_view, view, view.label());
                    }
                });

            ui.separator();
            ui.strong("📅 Date Range");
            // Collected for display only; filtering does not use it yet
            // (known limitation).
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut state.date_from).id_salt("date_from"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                ui.add(DatePickerButton::new(&mut state.date_to).id_salt("date_to"));
            });

            ui.separator();
            ui.strong("📊 Filters");
            ui.add(
                egui::Slider::new(&mut state.max_rows, 10..=300)
                    .step_by(10.0)
                    .text("Records to display"),
            );

            ui.label("Select Departments");
            for dept in Department::ALL {
                let label = dept.label();
                let mut checked = state.selected_departments.contains(label);
                let text = format!("{} {}", settings::department_icon(dept), label);
                if ui.checkbox(&mut checked, text).changed() {
                    if checked {
                        state.selected_departments.insert(label.to_string());
                    } else {
                        state.selected_departments.remove(label);
                    }
                }
            }

            ui.separator();
            if ui.button("🔄 Refresh Data").clicked() {
                state.reload();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, record counts for the selected view and the
/// current status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Opsboard – Performance Dashboard");
        ui.separator();

        match state.selected_view.department() {
            Some(dept) => {
                let loaded = state.raw_len(dept);
                let shown = state.filtered(dept).len();
                ui.label(format!("{loaded} records loaded, {shown} shown"));
            }
            None => {
                let loaded: usize = Department::ALL.iter().map(|&d| state.raw_len(d)).sum();
                ui.label(format!("{loaded} records loaded across departments"));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
