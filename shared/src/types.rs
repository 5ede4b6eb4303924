//! Common types used across the platform

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{MaintenanceLog, MaintenanceProgram, Vehicle};

/// How a task's interval is measured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    /// Distance only
    Mileage,
    /// Elapsed time only
    Time,
    /// Both axes, due at whichever is reached first
    Dual,
}

impl IntervalType {
    pub fn uses_mileage(&self) -> bool {
        matches!(self, IntervalType::Mileage | IntervalType::Dual)
    }

    pub fn uses_time(&self) -> bool {
        matches!(self, IntervalType::Time | IntervalType::Dual)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalType::Mileage => "mileage",
            IntervalType::Time => "time",
            IntervalType::Dual => "dual",
        }
    }
}

impl std::fmt::Display for IntervalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar unit for time-based intervals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    #[default]
    Months,
    Years,
}

impl TimeUnit {
    /// Add `amount` units to `date` using calendar arithmetic.
    ///
    /// Month and year steps clamp to the last day of the target month,
    /// so Jan 31 + 1 month is Feb 28 (or 29).
    pub fn add_to(&self, date: NaiveDate, amount: u32) -> Option<NaiveDate> {
        match self {
            TimeUnit::Days => date.checked_add_days(Days::new(u64::from(amount))),
            TimeUnit::Weeks => date.checked_add_days(Days::new(u64::from(amount) * 7)),
            TimeUnit::Months => date.checked_add_months(Months::new(amount)),
            TimeUnit::Years => date.checked_add_months(Months::new(amount.checked_mul(12)?)),
        }
    }

    /// Singular or plural label for display
    pub fn label(&self, amount: u32) -> &'static str {
        match (self, amount == 1) {
            (TimeUnit::Days, true) => "day",
            (TimeUnit::Days, false) => "days",
            (TimeUnit::Weeks, true) => "week",
            (TimeUnit::Weeks, false) => "weeks",
            (TimeUnit::Months, true) => "month",
            (TimeUnit::Months, false) => "months",
            (TimeUnit::Years, true) => "year",
            (TimeUnit::Years, false) => "years",
        }
    }
}

/// Everything the engine needs for one calculation, as fetched by the app
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub programs: Vec<MaintenanceProgram>,
    #[serde(default)]
    pub maintenance_logs: Vec<MaintenanceLog>,
}

impl FleetSnapshot {
    pub fn vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }
}

/// Format a mileage with thousands separators ("12,500")
pub fn format_miles(miles: u32) -> String {
    let digits = miles.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
