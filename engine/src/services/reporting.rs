//! Reminder export and reporting
//! Provides CSV export of reminder lists and a Markdown fleet report

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    format_miles, total_spend, MaintenanceLog, ReminderCalculationResult, ReminderItem, ReminderPriority,
};

use crate::error::{EngineError, EngineResult};

/// One CSV row per reminder
#[derive(Debug, Serialize)]
pub struct ReminderRecord<'a> {
    pub id: &'a str,
    pub vehicle: &'a str,
    pub program: &'a str,
    pub task: &'a str,
    pub category: &'a str,
    pub status: String,
    pub priority: String,
    pub due_type: &'static str,
    pub current_mileage: u32,
    pub due_mileage: Option<u32>,
    pub due_date: Option<NaiveDate>,
    pub estimated_due_date: Option<NaiveDate>,
    pub overdue_miles: Option<u32>,
    pub overdue_days: Option<u32>,
    pub last_service_date: Option<NaiveDate>,
    pub description: &'a str,
}

impl<'a> From<&'a ReminderItem> for ReminderRecord<'a> {
    fn from(item: &'a ReminderItem) -> Self {
        Self {
            id: &item.id,
            vehicle: &item.vehicle_name,
            program: &item.program_name,
            task: &item.task_name,
            category: &item.task_category,
            status: item.status.to_string(),
            priority: item.priority.to_string(),
            due_type: item.due_type.as_str(),
            current_mileage: item.current_mileage,
            due_mileage: item.due_mileage,
            due_date: item.due_date,
            estimated_due_date: item.estimated_due_date,
            overdue_miles: item.overdue_miles,
            overdue_days: item.overdue_days,
            last_service_date: item.last_service_date,
            description: &item.description,
        }
    }
}

/// Column names of [`ReminderRecord`], in field order
const CSV_HEADER: [&str; 16] = [
    "id",
    "vehicle",
    "program",
    "task",
    "category",
    "status",
    "priority",
    "due_type",
    "current_mileage",
    "due_mileage",
    "due_date",
    "estimated_due_date",
    "overdue_miles",
    "overdue_days",
    "last_service_date",
    "description",
];

/// Export reminders to CSV, header row first (also for an empty list)
pub fn export_to_csv(reminders: &[ReminderItem]) -> EngineResult<String> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for item in reminders {
        wtr.serialize(ReminderRecord::from(item))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| EngineError::Export(format!("CSV writer error: {}", e)))?;
    let csv_data =
        String::from_utf8(bytes).map_err(|e| EngineError::Export(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}

/// Markdown report of one calculation.
///
/// `logs` feeds the spend section; pass the same history used for the
/// calculation.
pub fn build_report(result: &ReminderCalculationResult, logs: &[MaintenanceLog], as_of: NaiveDate) -> String {
    let mut output = String::new();
    let summary = &result.summary;

    let _ = writeln!(output, "# Maintenance Reminder Report");
    let _ = writeln!(output, "Generated for {}", as_of);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");

    if summary.is_all_clear() {
        let _ = writeln!(output, "All vehicles are up to date.");
    } else {
        let _ = writeln!(
            output,
            "{} reminders: {} overdue, {} due, {} upcoming ({} critical)",
            summary.total, summary.overdue, summary.due, summary.upcoming, summary.critical
        );
    }

    for priority in [
        ReminderPriority::Critical,
        ReminderPriority::High,
        ReminderPriority::Medium,
        ReminderPriority::Low,
    ] {
        let items: Vec<&ReminderItem> = result.reminders.iter().filter(|r| r.priority == priority).collect();
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "## {} Priority", priority);
        for item in items {
            let _ = writeln!(
                output,
                "- {} / {}: {} ({})",
                item.vehicle_name, item.task_name, item.description, item.status
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Usage Patterns");

    if result.vehicle_patterns.is_empty() {
        let _ = writeln!(output, "No vehicles in this snapshot.");
    } else {
        for pattern in &result.vehicle_patterns {
            let _ = writeln!(
                output,
                "- {}: {:.1} miles/day, {} miles/month ({:?} confidence)",
                pattern.vehicle_id,
                pattern.average_miles_per_day,
                format_miles(pattern.average_miles_per_month.round() as u32),
                pattern.confidence
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Maintenance Spend");

    let mut any_spend = false;
    for pattern in &result.vehicle_patterns {
        let spend = total_spend(logs, &pattern.vehicle_id);
        if spend.is_zero() {
            continue;
        }
        any_spend = true;
        let _ = writeln!(output, "- {}: ${}", pattern.vehicle_id, spend.round_dp(2));
    }
    if !any_spend {
        let _ = writeln!(output, "No recorded spend.");
    }

    output
}
