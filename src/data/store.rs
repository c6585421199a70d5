use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Dataset, FieldValue, Record};

// ---------------------------------------------------------------------------
// Department – the four dataset kinds
// ---------------------------------------------------------------------------

/// One business unit, mapped to one source file under the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Department {
    ItSolutions,
    HrStaffing,
    BusinessConsulting,
    DataAiServices,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::ItSolutions,
        Department::HrStaffing,
        Department::BusinessConsulting,
        Department::DataAiServices,
    ];

    /// Human-readable label; also the value space of the `department`
    /// category column used for filtering.
    pub fn label(&self) -> &'static str {
        match self {
            Department::ItSolutions => "IT Solutions",
            Department::HrStaffing => "HR & Staffing",
            Department::BusinessConsulting => "Business Consulting",
            Department::DataAiServices => "Data & AI Services",
        }
    }

    /// Source file stem (and export file name) for this department.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Department::ItSolutions => "it_solutions",
            Department::HrStaffing => "hr_staffing",
            Department::BusinessConsulting => "business_consulting",
            Department::DataAiServices => "data_ai_services",
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetStore – load-by-name with a never-fail contract
// ---------------------------------------------------------------------------

/// Loads department datasets from a data directory. A missing or unreadable
/// source is recovered locally: the failure is logged and an empty dataset
/// is returned, so the dashboard always has something to render.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DatasetStore {
            data_dir: data_dir.into(),
        }
    }

    /// Load one department's dataset. Never fails: any loader error yields
    /// an empty dataset with the cause logged.
    pub fn load(&self, dept: Department) -> Dataset {
        let path = self.data_dir.join(format!("{}.csv", dept.file_stem()));
        match load_file(&path) {
            Ok(ds) => {
                log::info!(
                    "loaded {} records for {} from {}",
                    ds.len(),
                    dept.label(),
                    path.display()
                );
                ds
            }
            Err(e) => {
                log::warn!("could not load {}: {e:#}", path.display());
                Dataset::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File loading – dispatch by extension
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, one record per line (the four shipped sources)
/// * `.json` – records orientation: `[{ "col": value, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut record = Record::new();
        for (col_idx, cell) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            record.insert(col_name.clone(), guess_field_type(cell));
        }
        records.push(record);
    }

    Ok(Dataset::new(headers, records))
}

/// Infer a cell's type from its text. Dates are recognised in ISO
/// `YYYY-MM-DD` form, matching the shipped sources.
fn guess_field_type(s: &str) -> FieldValue {
    let s = s.trim();
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    if is_iso_date(s) {
        return FieldValue::Date(s.to_string());
    }
    FieldValue::Text(s.to_string())
}

fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "project_name": "CRM Migration", "status": "Active", "budget": 500000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record: Record = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_field(val)))
            .collect::<BTreeMap<_, _>>();
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) if is_iso_date(s) => FieldValue::Date(s.clone()),
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_source_yields_empty_dataset() {
        let store = DatasetStore::new("/nonexistent/dir");
        let ds = store.load(Department::ItSolutions);
        assert!(ds.is_empty());
        assert!(ds.column_names.is_empty());
    }

    #[test]
    fn csv_round_trips_with_type_guessing() {
        let dir = std::env::temp_dir().join("opsboard_store_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("it_solutions.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "project_name,status,completion_percentage,budget,start_date").unwrap();
        writeln!(f, "CRM Migration,Active,62.5,500000,2024-03-01").unwrap();
        writeln!(f, "Helpdesk Revamp,Completed,100,,2023-11-15").unwrap();
        drop(f);

        let store = DatasetStore::new(&dir);
        let ds = store.load(Department::ItSolutions);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names[0], "project_name");
        assert_eq!(
            ds.records[0].get("completion_percentage"),
            Some(&FieldValue::Float(62.5))
        );
        assert_eq!(ds.records[0].get("budget"), Some(&FieldValue::Integer(500_000)));
        assert_eq!(
            ds.records[0].get("start_date"),
            Some(&FieldValue::Date("2024-03-01".into()))
        );
        // Empty cell → Null, excluded from the value index.
        assert_eq!(ds.records[1].get("budget"), Some(&FieldValue::Null));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn guesses_cover_the_dtype_space() {
        assert_eq!(guess_field_type("42"), FieldValue::Integer(42));
        assert_eq!(guess_field_type("4.2"), FieldValue::Float(4.2));
        assert_eq!(guess_field_type("true"), FieldValue::Bool(true));
        assert_eq!(
            guess_field_type("2024-01-31"),
            FieldValue::Date("2024-01-31".into())
        );
        assert_eq!(guess_field_type(""), FieldValue::Null);
        assert_eq!(
            guess_field_type("On Hold"),
            FieldValue::Text("On Hold".into())
        );
    }

    #[test]
    fn json_records_orientation() {
        let dir = std::env::temp_dir().join("opsboard_store_json_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.json");
        std::fs::write(
            &path,
            r#"[{"status": "Active", "budget": 1000}, {"status": "Completed", "budget": null}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column("status"));
        assert_eq!(ds.records[0].get("budget"), Some(&FieldValue::Integer(1000)));
        assert_eq!(ds.records[1].get("budget"), Some(&FieldValue::Null));

        std::fs::remove_dir_all(&dir).ok();
    }
}
