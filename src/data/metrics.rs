use super::aggregate::{aggregate, count_matching, Operation};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Kpi – one headline metric with a placeholder trend
// ---------------------------------------------------------------------------

/// A single headline metric: label, raw value, pre-formatted display text
/// and a small trend series for the sparkline under the metric.
///
/// The trend points are SYNTHETIC placeholders derived from the current
/// value (small constants subtracted, clamped at zero). There is no
/// historical storage behind them; they exist only to sketch a direction
/// on the KPI card and must not be read as a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: f64,
    pub display: String,
    pub trend: Vec<f64>,
}

impl Kpi {
    fn new(label: &'static str, value: f64, display: String, trend: Vec<f64>) -> Self {
        Kpi {
            label,
            value,
            display,
            trend,
        }
    }
}

/// Three placeholder points leading up to the current value.
fn trend_minus(value: f64, a: f64, b: f64) -> Vec<f64> {
    vec![(value - a).max(0.0), (value - b).max(0.0), value]
}

/// Multiplicative variant for money-scale values.
fn trend_scale(value: f64, a: f64, b: f64) -> Vec<f64> {
    vec![(value * a).max(0.0), (value * b).max(0.0), value]
}

/// Group an integer-valued amount with thousands separators.
pub fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Per-view KPI rows
// ---------------------------------------------------------------------------

/// Company overview. Revenue and satisfaction are static sample figures;
/// the record-derived KPIs come from the already-filtered datasets.
pub fn overview_kpis(it: &Dataset, hr: &Dataset, consulting: &Dataset, ai: &Dataset) -> Vec<Kpi> {
    let total_projects = (it.len() + consulting.len() + ai.len()) as f64;
    let total_employees = hr.len() as f64;
    let monthly_revenue = 2_500_000.0;
    let satisfaction = 94.5;

    vec![
        Kpi::new(
            "Total Active Projects",
            total_projects,
            format!("{total_projects:.0}"),
            trend_minus(total_projects, 3.0, 1.0),
        ),
        Kpi::new(
            "Total Employees",
            total_employees,
            format!("{total_employees:.0}"),
            trend_minus(total_employees, 10.0, 5.0),
        ),
        Kpi::new(
            "Monthly Revenue (PKR)",
            monthly_revenue,
            group_thousands(monthly_revenue),
            trend_scale(monthly_revenue / 1e5, 0.85, 0.9),
        ),
        Kpi::new(
            "Client Satisfaction",
            satisfaction,
            format!("{satisfaction}%"),
            vec![90.0, 92.0, satisfaction],
        ),
    ]
}

/// Information Technology view.
pub fn it_kpis(data: &Dataset) -> Vec<Kpi> {
    let active = count_matching(data, "status", "Active");
    let completed = count_matching(data, "status", "Completed");
    let avg_completion = aggregate(data, "completion_percentage", Operation::Mean);
    let total_budget = aggregate(data, "budget", Operation::Sum);

    vec![
        Kpi::new(
            "Active Projects",
            active,
            format!("{active:.0}"),
            trend_minus(active, 2.0, 1.0),
        ),
        Kpi::new(
            "Completed Projects",
            completed,
            format!("{completed:.0}"),
            trend_minus(completed, 3.0, 1.0),
        ),
        Kpi::new(
            "Avg Completion",
            avg_completion,
            format!("{avg_completion:.1}%"),
            trend_minus(avg_completion, 5.0, 2.0),
        ),
        Kpi::new(
            "Total Budget",
            total_budget,
            format!("PKR {}", group_thousands(total_budget)),
            trend_scale(total_budget, 0.9, 1.0),
        ),
    ]
}

/// HR Solutions & Services view.
pub fn hr_kpis(data: &Dataset) -> Vec<Kpi> {
    let employees = data.len() as f64;
    let avg_perf = aggregate(data, "performance_score", Operation::Mean);
    let active = count_matching(data, "status", "Active");
    let avg_salary = aggregate(data, "salary", Operation::Mean);

    vec![
        Kpi::new(
            "Total Employees",
            employees,
            format!("{employees:.0}"),
            trend_minus(employees, 10.0, 5.0),
        ),
        Kpi::new(
            "Avg Performance",
            avg_perf,
            format!("{avg_perf:.1}/10"),
            trend_minus(avg_perf, 1.0, 0.0),
        ),
        Kpi::new(
            "Active Employees",
            active,
            format!("{active:.0}"),
            trend_minus(active, 2.0, 0.0),
        ),
        Kpi::new(
            "Avg Salary",
            avg_salary,
            format!("PKR {}", group_thousands(avg_salary)),
            trend_scale(avg_salary, 0.95, 1.0),
        ),
    ]
}

/// Business Consulting view.
pub fn consulting_kpis(data: &Dataset) -> Vec<Kpi> {
    let active = count_matching(data, "status", "Active");
    let avg_duration = aggregate(data, "duration_months", Operation::Mean);
    let total_value = aggregate(data, "project_value", Operation::Sum);
    let satisfaction = aggregate(data, "client_satisfaction", Operation::Mean);

    vec![
        Kpi::new(
            "Active Consultations",
            active,
            format!("{active:.0}"),
            trend_minus(active, 2.0, 0.0),
        ),
        Kpi::new(
            "Avg Duration",
            avg_duration,
            format!("{avg_duration:.1} months"),
            trend_minus(avg_duration, 2.0, 0.0),
        ),
        Kpi::new(
            "Total Value",
            total_value,
            format!("PKR {}", group_thousands(total_value)),
            trend_scale(total_value, 0.9, 1.0),
        ),
        Kpi::new(
            "Client Satisfaction",
            satisfaction,
            format!("{satisfaction:.1}/10"),
            trend_minus(satisfaction, 1.0, 0.0),
        ),
    ]
}

/// Data Digitization (AI & data services) view.
pub fn ai_kpis(data: &Dataset) -> Vec<Kpi> {
    let active = count_matching(data, "status", "Active");
    let avg_accuracy = aggregate(data, "model_accuracy", Operation::Mean);
    let data_volume = aggregate(data, "data_volume_gb", Operation::Sum);
    let savings = aggregate(data, "automation_savings", Operation::Sum);

    vec![
        Kpi::new(
            "Active AI Projects",
            active,
            format!("{active:.0}"),
            trend_minus(active, 1.0, 0.0),
        ),
        Kpi::new(
            "Avg Model Accuracy",
            avg_accuracy,
            format!("{avg_accuracy:.1}%"),
            trend_minus(avg_accuracy, 2.0, 0.0),
        ),
        Kpi::new(
            "Data Processed",
            data_volume,
            format!("{data_volume:.0} GB"),
            trend_minus(data_volume, 50.0, 0.0),
        ),
        Kpi::new(
            "Automation Savings",
            savings,
            format!("PKR {}", group_thousands(savings)),
            trend_scale(savings, 0.9, 1.0),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::rec;
    use crate::data::model::FieldValue;

    #[test]
    fn empty_datasets_give_zero_kpis() {
        let empty = Dataset::default();
        for kpi in it_kpis(&empty)
            .into_iter()
            .chain(hr_kpis(&empty))
            .chain(consulting_kpis(&empty))
            .chain(ai_kpis(&empty))
        {
            assert_eq!(kpi.value, 0.0, "{} should be zero", kpi.label);
        }
    }

    #[test]
    fn trends_are_clamped_at_zero() {
        assert_eq!(trend_minus(1.0, 3.0, 1.0), vec![0.0, 0.0, 1.0]);
        assert_eq!(trend_minus(5.0, 2.0, 1.0), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn it_kpis_from_records() {
        let ds = Dataset::new(
            vec!["status".into(), "completion_percentage".into(), "budget".into()],
            vec![
                rec(&[
                    ("status", FieldValue::Text("Active".into())),
                    ("completion_percentage", FieldValue::Float(40.0)),
                    ("budget", FieldValue::Integer(1_000)),
                ]),
                rec(&[
                    ("status", FieldValue::Text("Completed".into())),
                    ("completion_percentage", FieldValue::Float(100.0)),
                    ("budget", FieldValue::Integer(2_000)),
                ]),
            ],
        );
        let kpis = it_kpis(&ds);
        assert_eq!(kpis[0].value, 1.0);
        assert_eq!(kpis[1].value, 1.0);
        assert_eq!(kpis[2].value, 70.0);
        assert_eq!(kpis[3].value, 3_000.0);
        assert_eq!(kpis[3].display, "PKR 3,000");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(2_500_000.0), "2,500,000");
        assert_eq!(group_thousands(-1234.0), "-1,234");
    }

    #[test]
    fn overview_mixes_derived_and_sample_figures() {
        let one_row = Dataset::new(
            vec!["status".into()],
            vec![rec(&[("status", FieldValue::Text("Active".into()))])],
        );
        let kpis = overview_kpis(&one_row, &one_row, &one_row, &one_row);
        assert_eq!(kpis[0].value, 3.0); // it + consulting + ai
        assert_eq!(kpis[1].value, 1.0); // hr
        assert_eq!(kpis[2].display, "2,500,000");
        assert_eq!(kpis[3].value, 94.5);
    }
}
