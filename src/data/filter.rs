use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::model::Dataset;

/// Fixed seed for downsampling: repeated renders of the same data must
/// show the same subset. Reproducibility, not statistical rigour.
const SAMPLE_SEED: u64 = 42;

/// The category column the sidebar filter targets.
const DEPARTMENT_COLUMN: &str = "department";

// ---------------------------------------------------------------------------
// FilterCriteria – the selection surface passed by value into the core
// ---------------------------------------------------------------------------

/// Current UI selection, owned by the presentation layer and handed to
/// [`apply`] per render. The sidebar's date range is deliberately not part
/// of the criteria: it is collected but never applied to filtering (known
/// limitation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Allowed values of the `department` column. An empty set means
    /// "no department constraint" (nothing selected behaves like the
    /// filter being cleared).
    pub departments: BTreeSet<String>,
    /// Maximum number of records to keep.
    pub max_rows: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            departments: BTreeSet::new(),
            max_rows: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Apply the criteria to a dataset, returning a fresh filtered copy.
///
/// * Empty input → empty output, never an error.
/// * The department predicate only applies when the dataset actually has a
///   `department` column and the allowed set is non-empty; otherwise it is
///   skipped entirely.
/// * If more records remain than `max_rows`, the result is downsampled to
///   exactly `max_rows` with a fixed-seed RNG; sampled rows keep their
///   input order.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    if dataset.is_empty() {
        return Dataset::default();
    }

    let filter_by_department =
        dataset.has_column(DEPARTMENT_COLUMN) && !criteria.departments.is_empty();

    let mut kept: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if !filter_by_department {
                return true;
            }
            match rec.get(DEPARTMENT_COLUMN).and_then(|v| v.as_str()) {
                Some(dept) => criteria.departments.contains(dept),
                None => false,
            }
        })
        .map(|(i, _)| i)
        .collect();

    if kept.len() > criteria.max_rows {
        kept = sample_indices(&kept, criteria.max_rows);
    }

    let records = kept.iter().map(|&i| dataset.records[i].clone()).collect();
    Dataset::new(dataset.column_names.clone(), records)
}

/// Pick `amount` of the given indices with a fixed seed, re-sorted so the
/// output preserves input row order.
fn sample_indices(indices: &[usize], amount: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(SAMPLE_SEED);
    let mut picked: Vec<usize> = rand::seq::index::sample(&mut rng, indices.len(), amount)
        .into_iter()
        .map(|i| indices[i])
        .collect();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::rec;
    use crate::data::model::FieldValue;

    fn dataset_of(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                rec(&[
                    ("id", FieldValue::Integer(i as i64)),
                    (
                        "department",
                        FieldValue::Text(if i % 2 == 0 { "IT Solutions" } else { "HR & Staffing" }.into()),
                    ),
                ])
            })
            .collect();
        Dataset::new(vec!["id".into(), "department".into()], records)
    }

    fn ids(ds: &Dataset) -> Vec<i64> {
        ds.records
            .iter()
            .map(|r| match r.get("id") {
                Some(FieldValue::Integer(i)) => *i,
                other => panic!("unexpected id {other:?}"),
            })
            .collect()
    }

    #[test]
    fn empty_input_is_a_noop() {
        let out = apply(&Dataset::default(), &FilterCriteria::default());
        assert!(out.is_empty());
    }

    #[test]
    fn result_size_is_min_of_len_and_max_rows() {
        let ds = dataset_of(120);
        let criteria = FilterCriteria {
            departments: BTreeSet::new(),
            max_rows: 100,
        };
        assert_eq!(apply(&ds, &criteria).len(), 100);

        let small = dataset_of(30);
        assert_eq!(apply(&small, &criteria).len(), 30);
    }

    #[test]
    fn downsampling_is_deterministic() {
        let ds = dataset_of(120);
        let criteria = FilterCriteria {
            departments: BTreeSet::new(),
            max_rows: 100,
        };
        let a = apply(&ds, &criteria);
        let b = apply(&ds, &criteria);
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.len(), 100);
    }

    #[test]
    fn idempotent_when_under_the_bound() {
        let ds = dataset_of(50);
        let criteria = FilterCriteria {
            departments: ["IT Solutions".to_string()].into_iter().collect(),
            max_rows: 100,
        };
        let once = apply(&ds, &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn department_membership_is_enforced() {
        let ds = dataset_of(10);
        let criteria = FilterCriteria {
            departments: ["HR & Staffing".to_string()].into_iter().collect(),
            max_rows: 100,
        };
        let out = apply(&ds, &criteria);
        assert_eq!(out.len(), 5);
        assert!(out
            .values("department")
            .all(|v| v.as_str() == Some("HR & Staffing")));
    }

    #[test]
    fn absent_department_column_skips_the_predicate() {
        let ds = Dataset::new(
            vec!["id".into()],
            (0..4).map(|i| rec(&[("id", FieldValue::Integer(i))])).collect(),
        );
        let criteria = FilterCriteria {
            departments: ["IT Solutions".to_string()].into_iter().collect(),
            max_rows: 100,
        };
        assert_eq!(apply(&ds, &criteria).len(), 4);
    }

    #[test]
    fn empty_selection_means_no_filter() {
        let ds = dataset_of(10);
        let criteria = FilterCriteria {
            departments: BTreeSet::new(),
            max_rows: 100,
        };
        assert_eq!(apply(&ds, &criteria).len(), 10);
    }

    #[test]
    fn input_is_not_mutated_and_order_is_preserved() {
        let ds = dataset_of(120);
        let before = ids(&ds);
        let criteria = FilterCriteria {
            departments: BTreeSet::new(),
            max_rows: 20,
        };
        let out = apply(&ds, &criteria);
        assert_eq!(ids(&ds), before);

        let sampled = ids(&out);
        let mut sorted = sampled.clone();
        sorted.sort_unstable();
        assert_eq!(sampled, sorted);
    }
}
