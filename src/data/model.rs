use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell in a dataset column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes found in the CSV
/// sources. Using `BTreeMap` / `BTreeSet` downstream so `FieldValue` must
/// be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{v:.0}")
                } else {
                    write!(f, "{v}")
                }
            }
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Date(d) => write!(f, "{d}"),
            // Null renders as an empty cell in tables and exports.
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Try to interpret the value as an `f64` for aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Borrow the textual content of `Text` / `Date` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a dataset
// ---------------------------------------------------------------------------

/// One row of a dataset: column_name → value.
pub type Record = BTreeMap<String, FieldValue>;

// ---------------------------------------------------------------------------
// Dataset – the complete in-memory table
// ---------------------------------------------------------------------------

/// An in-memory table of records sharing a schema, with pre-computed
/// column indices. A column missing from the source file is simply absent
/// from every record; downstream consumers treat that as "value unknown"
/// rather than an error.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Ordered list of column names (source header order when known).
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build a dataset from rows with a known column order (CSV header).
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();
        for rec in &records {
            for (col, val) in rec {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Build a dataset when no column order is known (JSON sources):
    /// columns come out in sorted order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: BTreeSet<String> = BTreeSet::new();
        for rec in &records {
            for col in rec.keys() {
                columns.insert(col.clone());
            }
        }
        Self::new(columns.into_iter().collect(), records)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record carries the given column.
    pub fn has_column(&self, name: &str) -> bool {
        self.unique_values.contains_key(name)
    }

    /// All non-null values of a column, in record order. Yields nothing
    /// when the column is absent; this is the single place the
    /// "missing column → no values" rule lives.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.records
            .iter()
            .filter_map(move |rec| rec.get(name))
            .filter(|v| !v.is_null())
    }

    /// Numeric values of a column, in record order, skipping non-numeric
    /// cells. Empty when the column is absent.
    pub fn numbers<'a>(&'a self, name: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.values(name).filter_map(FieldValue::as_f64)
    }

    /// Concatenate several labelled datasets into one, tagging each record
    /// with its origin in a trailing `source` column. Column order is the
    /// first-seen order across the parts.
    pub fn concat(parts: &[(&str, &Dataset)]) -> Dataset {
        let mut columns: Vec<String> = Vec::new();
        let mut records: Vec<Record> = Vec::new();

        for (label, ds) in parts {
            for col in &ds.column_names {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
            for rec in &ds.records {
                let mut merged = rec.clone();
                merged.insert("source".to_string(), FieldValue::Text(label.to_string()));
                records.push(merged);
            }
        }
        if !records.is_empty() {
            columns.push("source".to_string());
        }
        Dataset::new(columns, records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn rec(pairs: &[(&str, FieldValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn values_skips_absent_column_and_nulls() {
        let ds = Dataset::new(
            vec!["status".into()],
            vec![
                rec(&[("status", FieldValue::Text("Active".into()))]),
                rec(&[("status", FieldValue::Null)]),
            ],
        );
        assert_eq!(ds.values("status").count(), 1);
        assert_eq!(ds.values("budget").count(), 0);
        assert!(!ds.has_column("budget"));
    }

    #[test]
    fn numbers_coerces_integers() {
        let ds = Dataset::new(
            vec!["budget".into()],
            vec![
                rec(&[("budget", FieldValue::Integer(100))]),
                rec(&[("budget", FieldValue::Float(2.5))]),
                rec(&[("budget", FieldValue::Text("n/a".into()))]),
            ],
        );
        let total: f64 = ds.numbers("budget").sum();
        assert_eq!(total, 102.5);
    }

    #[test]
    fn concat_tags_source_and_unions_columns() {
        let a = Dataset::new(
            vec!["status".into()],
            vec![rec(&[("status", FieldValue::Text("Active".into()))])],
        );
        let b = Dataset::new(
            vec!["salary".into()],
            vec![rec(&[("salary", FieldValue::Integer(90_000))])],
        );
        let combined = Dataset::concat(&[("it_solutions", &a), ("hr_staffing", &b)]);
        assert_eq!(combined.len(), 2);
        assert_eq!(
            combined.column_names,
            vec!["status".to_string(), "salary".into(), "source".into()]
        );
        assert_eq!(
            combined.records[1].get("source"),
            Some(&FieldValue::Text("hr_staffing".into()))
        );
    }

    #[test]
    fn empty_concat_has_no_columns() {
        let combined = Dataset::concat(&[]);
        assert!(combined.is_empty());
        assert!(combined.column_names.is_empty());
    }
}
