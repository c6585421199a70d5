use eframe::egui::Color32;

use crate::data::store::Department;

// ---------------------------------------------------------------------------
// Department configuration
// ---------------------------------------------------------------------------

pub fn department_color(dept: Department) -> Color32 {
    match dept {
        Department::ItSolutions => Color32::from_rgb(0x1f, 0x77, 0xb4),
        Department::HrStaffing => Color32::from_rgb(0xff, 0x7f, 0x0e),
        Department::BusinessConsulting => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        Department::DataAiServices => Color32::from_rgb(0xd6, 0x27, 0x28),
    }
}

pub fn department_icon(dept: Department) -> &'static str {
    match dept {
        Department::ItSolutions => "💻",
        Department::HrStaffing => "👥",
        Department::BusinessConsulting => "📈",
        Department::DataAiServices => "🤖",
    }
}

// ---------------------------------------------------------------------------
// Status row colours (details tables)
// ---------------------------------------------------------------------------

/// Background tint for a record's status cell. Unknown statuses get none.
pub fn status_color(status: &str) -> Option<Color32> {
    match status {
        "On Hold" => Some(Color32::from_rgb(0xff, 0xe6, 0xe6)),
        "Planning" => Some(Color32::from_rgb(0xff, 0xf4, 0xe6)),
        "Completed" => Some(Color32::from_rgb(0xe6, 0xff, 0xe6)),
        "Active" => Some(Color32::from_rgb(0xe6, 0xf0, 0xff)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

pub const PRIMARY: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);

pub const CHART_HEIGHT: f32 = 280.0;
pub const KPI_SPARKLINE_HEIGHT: f32 = 56.0;
