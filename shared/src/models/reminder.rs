//! Reminder models produced by the due-status engine
//!
//! These are computed fresh on every calculation and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::VehicleUsagePattern;
use crate::types::IntervalType;

/// How urgent a task is right now. Variants are ordered least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Upcoming,
    Due,
    Overdue,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Upcoming => write!(f, "Upcoming"),
            ReminderStatus::Due => write!(f, "Due"),
            ReminderStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

/// Display priority. Variants are ordered lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for ReminderPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderPriority::Low => write!(f, "Low"),
            ReminderPriority::Medium => write!(f, "Medium"),
            ReminderPriority::High => write!(f, "High"),
            ReminderPriority::Critical => write!(f, "Critical"),
        }
    }
}

/// Where the "last serviced" point for a reminder came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BaselineSource {
    /// A matching entry in the maintenance history
    LastService,
    /// No history matched; derived from current mileage and vehicle creation date
    Estimated,
}

/// Overdue magnitude on the axis that drove the status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum OverdueBy {
    Miles(u32),
    Days(u32),
}

impl OverdueBy {
    pub fn magnitude(&self) -> u32 {
        match self {
            OverdueBy::Miles(v) | OverdueBy::Days(v) => *v,
        }
    }
}

/// One task on one vehicle that needs the owner's attention
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderItem {
    /// `program:task:vehicle`
    pub id: String,
    pub program_id: String,
    pub task_id: String,
    pub vehicle_id: String,
    pub task_name: String,
    pub task_category: String,
    pub vehicle_name: String,
    pub program_name: String,
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub due_type: IntervalType,
    pub current_mileage: u32,
    pub due_mileage: Option<u32>,
    pub due_date: Option<NaiveDate>,
    pub miles_remaining: Option<u32>,
    pub days_remaining: Option<i64>,
    pub overdue_miles: Option<u32>,
    pub overdue_days: Option<u32>,
    pub overdue_by: Option<OverdueBy>,
    pub estimated_due_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub last_service_mileage: Option<u32>,
    pub baseline_source: BaselineSource,
    pub description: String,
}

impl ReminderItem {
    pub fn composite_id(program_id: &str, task_id: &str, vehicle_id: &str) -> String {
        format!("{}:{}:{}", program_id, task_id, vehicle_id)
    }

    /// Date used to order items that are not yet overdue: the earlier of the
    /// calendar due date and the projected mileage crossing
    pub fn sort_date(&self) -> Option<NaiveDate> {
        match (self.estimated_due_date, self.due_date) {
            (Some(estimated), Some(due)) => Some(estimated.min(due)),
            (estimated, due) => estimated.or(due),
        }
    }
}

/// Counts over a final reminder list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSummary {
    pub total: usize,
    pub overdue: usize,
    pub due: usize,
    pub upcoming: usize,
    pub critical: usize,
}

impl ReminderSummary {
    pub fn tally(items: &[ReminderItem]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            summary.total += 1;
            match item.status {
                ReminderStatus::Overdue => summary.overdue += 1,
                ReminderStatus::Due => summary.due += 1,
                ReminderStatus::Upcoming => summary.upcoming += 1,
            }
            if item.priority == ReminderPriority::Critical {
                summary.critical += 1;
            }
            summary
        })
    }

    pub fn is_all_clear(&self) -> bool {
        self.total == 0
    }
}

/// Output of one full reminder calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCalculationResult {
    pub reminders: Vec<ReminderItem>,
    pub vehicle_patterns: Vec<VehicleUsagePattern>,
    pub summary: ReminderSummary,
}

impl ReminderCalculationResult {
    pub fn for_vehicle<'a>(&'a self, vehicle_id: &'a str) -> impl Iterator<Item = &'a ReminderItem> + 'a {
        self.reminders.iter().filter(move |r| r.vehicle_id == vehicle_id)
    }

    pub fn overdue(&self) -> impl Iterator<Item = &ReminderItem> {
        self.reminders
            .iter()
            .filter(|r| r.status == ReminderStatus::Overdue)
    }

    pub fn pattern_for(&self, vehicle_id: &str) -> Option<&VehicleUsagePattern> {
        self.vehicle_patterns.iter().find(|p| p.vehicle_id == vehicle_id)
    }
}
