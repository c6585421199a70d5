use super::model::{Dataset, FieldValue};

// ---------------------------------------------------------------------------
// Scalar aggregation
// ---------------------------------------------------------------------------

/// Scalar summary over one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Number of records with a non-null value in the column.
    Count,
    /// Sum of the column's numeric values.
    Sum,
    /// Arithmetic mean of the column's numeric values.
    Mean,
}

/// Compute a scalar summary. An absent column, an empty dataset, or a mean
/// over zero numeric values all yield `0.0`; the dashboard shows a zero
/// KPI instead of failing.
pub fn aggregate(dataset: &Dataset, field: &str, op: Operation) -> f64 {
    match op {
        Operation::Count => dataset.values(field).count() as f64,
        Operation::Sum => dataset.numbers(field).sum(),
        Operation::Mean => {
            let (sum, n) = dataset
                .numbers(field)
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if n == 0 {
                0.0
            } else {
                sum / n as f64
            }
        }
    }
}

/// Count records whose value for `field` satisfies the predicate.
/// Absent column → 0.
pub fn count_where<F>(dataset: &Dataset, field: &str, pred: F) -> f64
where
    F: Fn(&FieldValue) -> bool,
{
    dataset.values(field).filter(|v| pred(v)).count() as f64
}

/// Count records whose `field` equals the given text (the common
/// status-KPI case).
pub fn count_matching(dataset: &Dataset, field: &str, text: &str) -> f64 {
    count_where(dataset, field, |v| v.as_str() == Some(text))
}

// ---------------------------------------------------------------------------
// Frequency aggregation
// ---------------------------------------------------------------------------

/// Count records per distinct non-null value of a category column, ordered
/// by descending count with ties in first-seen input order. Absent column →
/// empty. The counts sum to the number of records where the column is
/// present.
pub fn frequency(dataset: &Dataset, field: &str) -> Vec<(FieldValue, usize)> {
    let mut counts: Vec<(FieldValue, usize)> = Vec::new();
    for value in dataset.values(field) {
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.clone(), 1)),
        }
    }
    // Stable sort keeps first-seen order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::rec;
    use crate::data::model::Dataset;

    fn status_dataset() -> Dataset {
        let statuses = ["Active", "Active", "Completed", "Completed", "Completed"];
        let records = statuses
            .iter()
            .map(|s| rec(&[("status", FieldValue::Text(s.to_string()))]))
            .collect();
        Dataset::new(vec!["status".into()], records)
    }

    #[test]
    fn mean_of_empty_dataset_is_zero() {
        let ds = Dataset::default();
        assert_eq!(aggregate(&ds, "completion_percentage", Operation::Mean), 0.0);
    }

    #[test]
    fn absent_column_aggregates_to_zero() {
        let ds = status_dataset();
        assert_eq!(aggregate(&ds, "budget", Operation::Sum), 0.0);
        assert_eq!(aggregate(&ds, "budget", Operation::Mean), 0.0);
        assert_eq!(aggregate(&ds, "budget", Operation::Count), 0.0);
    }

    #[test]
    fn mean_skips_non_numeric_cells() {
        let ds = Dataset::new(
            vec!["score".into()],
            vec![
                rec(&[("score", FieldValue::Float(8.0))]),
                rec(&[("score", FieldValue::Integer(6))]),
                rec(&[("score", FieldValue::Text("n/a".into()))]),
                rec(&[("score", FieldValue::Null)]),
            ],
        );
        assert_eq!(aggregate(&ds, "score", Operation::Mean), 7.0);
        assert_eq!(aggregate(&ds, "score", Operation::Sum), 14.0);
        // Count includes the non-numeric but non-null cell.
        assert_eq!(aggregate(&ds, "score", Operation::Count), 3.0);
    }

    #[test]
    fn count_matching_status() {
        let ds = status_dataset();
        assert_eq!(count_matching(&ds, "status", "Active"), 2.0);
        assert_eq!(count_matching(&ds, "status", "On Hold"), 0.0);
        assert_eq!(count_matching(&ds, "missing", "Active"), 0.0);
    }

    #[test]
    fn frequency_orders_by_descending_count() {
        let ds = status_dataset();
        let freq = frequency(&ds, "status");
        assert_eq!(
            freq,
            vec![
                (FieldValue::Text("Completed".into()), 3),
                (FieldValue::Text("Active".into()), 2),
            ]
        );
    }

    #[test]
    fn frequency_ties_keep_first_seen_order() {
        let ds = Dataset::new(
            vec!["technology".into()],
            ["Rust", "Python", "Rust", "Python", "Go"]
                .iter()
                .map(|t| rec(&[("technology", FieldValue::Text(t.to_string()))]))
                .collect(),
        );
        let freq = frequency(&ds, "technology");
        assert_eq!(freq[0].0, FieldValue::Text("Rust".into()));
        assert_eq!(freq[1].0, FieldValue::Text("Python".into()));
        assert_eq!(freq[2], (FieldValue::Text("Go".into()), 1));
    }

    #[test]
    fn frequency_mass_matches_present_records() {
        let ds = Dataset::new(
            vec!["status".into()],
            vec![
                rec(&[("status", FieldValue::Text("Active".into()))]),
                rec(&[("status", FieldValue::Null)]),
                rec(&[("status", FieldValue::Text("Active".into()))]),
            ],
        );
        let total: usize = frequency(&ds, "status").iter().map(|(_, n)| n).sum();
        assert_eq!(total, ds.values("status").count());
        assert_eq!(total, 2);
    }

    #[test]
    fn frequency_of_absent_column_is_empty() {
        assert!(frequency(&status_dataset(), "department").is_empty());
        assert!(frequency(&Dataset::default(), "status").is_empty());
    }
}
