use chrono::NaiveDate;

use crate::models::{JobCountRecord, StoredRecord};

/// Summary box for one collection run.
pub fn print_collected(
    record: &JobCountRecord,
    week_starting: NaiveDate,
    location: &str,
    title: &str,
) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Week Starting: {week_starting}");
    println!("Location: {location}");
    println!("{}", "-".repeat(60));
    print_count_line(title, record.baseline_count());
    print_count_line(&format!("Junior {title}"), record.junior_count());
    print_count_line(&format!("Senior {title}"), record.senior_count());
    println!("{}", "=".repeat(60));
    println!();
}

fn print_count_line(label: &str, count: i64) {
    println!("{:<30} {count:>6} results", format!("\"{label}\":"));
}

/// History table for the view subcommand.
pub fn print_history(records: &[StoredRecord], location: &str) {
    if records.is_empty() {
        println!("\nNo data found for location: {location}\n");
        return;
    }

    println!();
    println!("{}", "=".repeat(90));
    println!("Job Count History for {location}");
    println!("{}", "=".repeat(90));
    println!(
        "{:<15} {:>12} {:>10} {:>10} {:>10} {:<20}",
        "Week Starting", "Baseline", "Junior", "Senior", "Total", "  Collected At"
    );
    println!("{}", "-".repeat(90));

    for record in records {
        println!(
            "{:<15} {:>12} {:>10} {:>10} {:>10}   {:<20}",
            record.week_starting.to_string(),
            record.baseline_count,
            record.junior_count,
            record.senior_count,
            record.total(),
            record.collected_at.format("%Y-%m-%d"),
        );
    }

    println!("{}", "=".repeat(90));
    println!("Total records: {}", records.len());
    println!();
}
