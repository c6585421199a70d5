use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, Local, NaiveDate};

use crate::data::filter::{self, FilterCriteria};
use crate::data::model::Dataset;
use crate::data::store::{DatasetStore, Department};

// ---------------------------------------------------------------------------
// View – the five dashboard views
// ---------------------------------------------------------------------------

/// Which dashboard view is selected. An enum rather than view-name strings
/// so the per-view dispatch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    InformationTechnology,
    HrSolutions,
    BusinessConsulting,
    DataDigitization,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::InformationTechnology,
        View::HrSolutions,
        View::BusinessConsulting,
        View::DataDigitization,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::InformationTechnology => "Information Technology",
            View::HrSolutions => "HR Solutions and Services",
            View::BusinessConsulting => "Business Consulting",
            View::DataDigitization => "Data Digitization",
        }
    }

    /// The department whose dataset backs this view (None for Overview,
    /// which reads all four).
    pub fn department(&self) -> Option<Department> {
        match self {
            View::Overview => None,
            View::InformationTechnology => Some(Department::ItSolutions),
            View::HrSolutions => Some(Department::HrStaffing),
            View::BusinessConsulting => Some(Department::BusinessConsulting),
            View::DataDigitization => Some(Department::DataAiServices),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The selection surface
/// (view, date range, max rows, departments) lives here and is passed by
/// value into the core per render; the core never reads it directly.
pub struct AppState {
    store: DatasetStore,

    /// Raw datasets as last read from disk; refreshed on demand.
    raw: BTreeMap<Department, Dataset>,

    pub selected_view: View,

    /// Sidebar date range. Collected and displayed, but not applied to
    /// filtering; kept as a visible, known limitation rather than wired
    /// up with guessed semantics.
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,

    /// Maximum records shown per view (10–300).
    pub max_rows: usize,

    /// Departments allowed by the sidebar multi-select. Empty set behaves
    /// as "no filter".
    pub selected_departments: BTreeSet<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: DatasetStore) -> Self {
        let today = Local::now().date_naive();
        let mut state = AppState {
            store,
            raw: BTreeMap::new(),
            selected_view: View::Overview,
            date_from: today - Duration::days(30),
            date_to: today,
            max_rows: 100,
            selected_departments: Department::ALL
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// Re-read all four sources from disk (Refresh button). Missing
    /// sources come back as empty datasets; the store logs the cause.
    pub fn reload(&mut self) {
        for dept in Department::ALL {
            let ds = self.store.load(dept);
            self.raw.insert(dept, ds);
        }
        self.status_message = None;
    }

    /// The current selection as a value the core components consume.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            departments: self.selected_departments.clone(),
            max_rows: self.max_rows,
        }
    }

    /// Raw record count for a department (top-bar display).
    pub fn raw_len(&self, dept: Department) -> usize {
        self.raw.get(&dept).map(Dataset::len).unwrap_or(0)
    }

    /// The department's dataset with the current criteria applied.
    /// Recomputed per render from the raw data; filtering is pure, so this
    /// is just a function of (raw, criteria).
    pub fn filtered(&self, dept: Department) -> Dataset {
        match self.raw.get(&dept) {
            Some(ds) => filter::apply(ds, &self.criteria()),
            None => Dataset::default(),
        }
    }
}
