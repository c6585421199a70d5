//! Writes the four department CSVs into `data/`, deterministically, so a
//! fresh checkout has something to render.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STATUSES: [&str; 4] = ["Active", "Completed", "Planning", "On Hold"];
const DEPARTMENTS: [&str; 4] = [
    "IT Solutions",
    "HR & Staffing",
    "Business Consulting",
    "Data & AI Services",
];

fn main() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    std::fs::create_dir_all("data")?;

    write_it_solutions(&mut rng)?;
    write_hr_staffing(&mut rng)?;
    write_business_consulting(&mut rng)?;
    write_data_ai_services(&mut rng)?;

    println!("Wrote sample CSVs to data/");
    Ok(())
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or("")
}

fn write_it_solutions(rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    let technologies = ["Rust", "Python", "TypeScript", "Java", "Go", "C#"];
    let prefixes = ["CRM", "ERP", "Portal", "Mobile", "Cloud", "Helpdesk", "Billing", "Intranet"];
    let suffixes = ["Migration", "Revamp", "Rollout", "Integration", "Upgrade"];

    let mut w = csv::Writer::from_path("data/it_solutions.csv")?;
    w.write_record(["project_name", "status", "completion_percentage", "budget", "technology"])?;
    for i in 0..60 {
        let name = format!(
            "{} {} {}",
            pick(rng, &prefixes),
            pick(rng, &suffixes),
            i + 1
        );
        let status = pick(rng, &STATUSES);
        let completion: f64 = if status == "Completed" {
            100.0
        } else {
            rng.gen_range(5.0..95.0)
        };
        let budget = rng.gen_range(50..900) * 10_000;
        let completion = format!("{completion:.1}");
        let budget = budget.to_string();
        w.write_record([
            name.as_str(),
            status,
            completion.as_str(),
            budget.as_str(),
            pick(rng, &technologies),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_hr_staffing(rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path("data/hr_staffing.csv")?;
    w.write_record(["department", "status", "performance_score", "salary", "experience_years"])?;
    for _ in 0..140 {
        let performance: f64 = rng.gen_range(4.0..10.0);
        let experience = rng.gen_range(1..20);
        let salary = 40_000 + experience * 6_000 + rng.gen_range(0..25_000);
        let status = if rng.gen_range(0..10) < 8 { "Active" } else { "On Hold" };
        let performance = format!("{performance:.1}");
        let salary = salary.to_string();
        let experience = experience.to_string();
        w.write_record([
            pick(rng, &DEPARTMENTS),
            status,
            performance.as_str(),
            salary.as_str(),
            experience.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_business_consulting(rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    let areas = ["Strategy", "Operations", "Finance", "Digital Transformation", "Compliance"];
    let clients = [
        "Acme Foods", "Northwind Traders", "Globex", "Initech", "Umbrella Corp",
        "Stark Industries", "Wayne Enterprises", "Wonka Industries", "Tyrell Corp",
    ];

    let mut w = csv::Writer::from_path("data/business_consulting.csv")?;
    w.write_record([
        "status",
        "duration_months",
        "project_value",
        "client_satisfaction",
        "consulting_area",
        "start_date",
        "end_date",
        "client_name",
    ])?;
    let epoch = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    for _ in 0..45 {
        let duration: i64 = rng.gen_range(2..18);
        let start = epoch + Duration::days(rng.gen_range(0..600));
        let end = start + Duration::days(duration * 30);
        let value = rng.gen_range(20..400) * 10_000;
        let satisfaction: f64 = rng.gen_range(6.0..10.0);
        let duration_s = duration.to_string();
        let value = value.to_string();
        let satisfaction = format!("{satisfaction:.1}");
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        w.write_record([
            pick(rng, &STATUSES),
            duration_s.as_str(),
            value.as_str(),
            satisfaction.as_str(),
            pick(rng, &areas),
            start.as_str(),
            end.as_str(),
            pick(rng, &clients),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_data_ai_services(rng: &mut ChaCha8Rng) -> anyhow::Result<()> {
    let services = [
        "Document Digitization",
        "Predictive Analytics",
        "Chatbot",
        "OCR Pipeline",
        "Recommendation Engine",
    ];

    let mut w = csv::Writer::from_path("data/data_ai_services.csv")?;
    w.write_record([
        "status",
        "model_accuracy",
        "data_volume_gb",
        "automation_savings",
        "service_type",
    ])?;
    for _ in 0..35 {
        let accuracy: f64 = rng.gen_range(72.0..99.0);
        let volume: f64 = rng.gen_range(5.0..800.0);
        let savings = rng.gen_range(10..250) * 1_000;
        let accuracy = format!("{accuracy:.1}");
        let volume = format!("{volume:.0}");
        let savings = savings.to_string();
        w.write_record([
            pick(rng, &STATUSES),
            accuracy.as_str(),
            volume.as_str(),
            savings.as_str(),
            pick(rng, &services),
        ])?;
    }
    w.flush()?;
    Ok(())
}
