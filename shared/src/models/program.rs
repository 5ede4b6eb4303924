//! Maintenance program models

use serde::{Deserialize, Serialize};

use crate::types::{format_miles, IntervalType, TimeUnit};

/// A reusable set of recurring maintenance tasks assigned to vehicles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceProgram {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<ProgramTask>,
    #[serde(default)]
    pub assigned_vehicle_ids: Vec<String>,
    pub is_active: bool,
}

impl MaintenanceProgram {
    /// A program applies to a vehicle only while it is active and assigned
    pub fn applies_to(&self, vehicle_id: &str) -> bool {
        self.is_active && self.assigned_vehicle_ids.iter().any(|id| id == vehicle_id)
    }

    pub fn active_tasks(&self) -> impl Iterator<Item = &ProgramTask> {
        self.tasks.iter().filter(|t| t.is_active)
    }
}

/// A recurring task template inside a program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    pub interval_type: IntervalType,
    /// Miles between services (mileage and dual tasks)
    #[serde(default)]
    pub interval_value: Option<u32>,
    /// Amount of `time_interval_unit` between services (time and dual tasks)
    #[serde(default)]
    pub time_interval_value: Option<u32>,
    #[serde(default)]
    pub time_interval_unit: Option<TimeUnit>,
    /// Days before the due date to start surfacing the task
    #[serde(default)]
    pub reminder_offset: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl ProgramTask {
    /// Mileage interval, when the task type uses one and it is positive
    pub fn mileage_interval(&self) -> Option<u32> {
        if !self.interval_type.uses_mileage() {
            return None;
        }
        self.interval_value.filter(|v| *v > 0)
    }

    /// Time interval, when the task type uses one and it is positive.
    /// A missing unit is read as months.
    pub fn time_interval(&self) -> Option<(u32, TimeUnit)> {
        if !self.interval_type.uses_time() {
            return None;
        }
        self.time_interval_value
            .filter(|v| *v > 0)
            .map(|v| (v, self.time_interval_unit.unwrap_or_default()))
    }

    /// Whether at least one axis carries enough data to schedule the task
    pub fn is_schedulable(&self) -> bool {
        self.mileage_interval().is_some() || self.time_interval().is_some()
    }

    pub fn reminder_offset_days(&self, default_days: u32) -> u32 {
        self.reminder_offset.unwrap_or(default_days)
    }

    /// "Every 5,000 miles or 6 months, whichever comes first"
    pub fn interval_description(&self) -> String {
        let miles = self
            .mileage_interval()
            .map(|m| format!("{} miles", format_miles(m)));
        let time = self
            .time_interval()
            .map(|(v, unit)| format!("{} {}", v, unit.label(v)));

        match (miles, time) {
            (Some(m), Some(t)) => format!("Every {} or {}, whichever comes first", m, t),
            (Some(m), None) => format!("Every {}", m),
            (None, Some(t)) => format!("Every {}", t),
            (None, None) => "No interval set".to_string(),
        }
    }
}
