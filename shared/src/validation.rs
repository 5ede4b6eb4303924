//! Validation utilities for vehicle maintenance data
//!
//! The due-status engine never rejects data: these checks are used to explain
//! why a task was skipped and to report data-quality warnings on a snapshot.

use serde::{Deserialize, Serialize};

use crate::models::{latest_logged_mileage, ProgramTask};
use crate::types::{FleetSnapshot, IntervalType};

// ============================================================================
// Task Validations
// ============================================================================

/// Validate that a task carries enough interval data to be scheduled
pub fn validate_task_interval(task: &ProgramTask) -> Result<(), &'static str> {
    let has_miles = task.interval_value.is_some_and(|v| v > 0);
    let has_time = task.time_interval_value.is_some_and(|v| v > 0);

    match task.interval_type {
        IntervalType::Mileage if !has_miles => Err("Mileage interval must be greater than zero"),
        IntervalType::Time if !has_time => Err("Time interval must be greater than zero"),
        IntervalType::Dual if !has_miles && !has_time => {
            Err("Dual interval needs a mileage or time value greater than zero")
        }
        _ => Ok(()),
    }
}

/// Validate that a dual task defines both axes (it still schedules with one)
pub fn validate_dual_completeness(task: &ProgramTask) -> Result<(), &'static str> {
    if task.interval_type != IntervalType::Dual {
        return Ok(());
    }
    if task.mileage_interval().is_none() {
        return Err("Dual interval has no mileage value; only time will be tracked");
    }
    if task.time_interval().is_none() {
        return Err("Dual interval has no time value; only mileage will be tracked");
    }
    Ok(())
}

/// Validate reminder offset is within a year
pub fn validate_reminder_offset(days: u32) -> Result<(), &'static str> {
    if days > 365 {
        return Err("Reminder offset cannot exceed 365 days");
    }
    Ok(())
}

// ============================================================================
// Vehicle Validations
// ============================================================================

/// Validate model year (first production cars through next model year)
pub fn validate_vehicle_year(year: i32, current_year: i32) -> Result<(), &'static str> {
    if year < 1886 {
        return Err("Vehicle year is too early");
    }
    if year > current_year + 1 {
        return Err("Vehicle year is in the future");
    }
    Ok(())
}

/// Validate VIN format: 17 characters, letters and digits, no I, O or Q
pub fn validate_vin(vin: &str) -> Result<(), &'static str> {
    let vin = vin.trim();
    if vin.len() != 17 {
        return Err("VIN must be 17 characters");
    }
    if !vin.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()) {
        return Err("VIN must be uppercase letters and digits only");
    }
    if vin.chars().any(|c| matches!(c, 'I' | 'O' | 'Q')) {
        return Err("VIN cannot contain I, O or Q");
    }
    Ok(())
}

/// Check the North American VIN check digit (position 9)
pub fn is_valid_vin_check_digit(vin: &str) -> bool {
    const WEIGHTS: [u32; 17] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

    if validate_vin(vin).is_err() {
        return false;
    }
    let chars: Vec<char> = vin.trim().chars().collect();

    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let value = match vin_transliteration(*c) {
            Some(v) => v,
            None => return false,
        };
        sum += value * WEIGHTS[i];
    }

    let expected = match sum % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };
    chars[8] == expected
}

fn vin_transliteration(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let value = match c {
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => return None,
    };
    Some(value)
}

/// Odometer should not read lower than the latest logged service
pub fn validate_odometer_progression(current: u32, latest_logged: Option<u32>) -> Result<(), &'static str> {
    match latest_logged {
        Some(logged) if current < logged => {
            Err("Current mileage is below the latest logged service mileage")
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Snapshot Validations
// ============================================================================

/// A data-quality finding on a snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// What the issue is about, e.g. `vehicle veh-1` or `task prog-1/oil`
    pub subject: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(subject: String, message: &str) -> Self {
        Self {
            subject,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Collect data-quality warnings without altering the snapshot
pub fn validate_snapshot(snapshot: &FleetSnapshot, current_year: i32) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for vehicle in &snapshot.vehicles {
        let subject = format!("vehicle {}", vehicle.id);
        if let Err(e) = validate_vehicle_year(vehicle.year, current_year) {
            issues.push(ValidationIssue::new(subject.clone(), e));
        }
        if let Some(vin) = vehicle.vin.as_deref().filter(|v| !v.trim().is_empty()) {
            if let Err(e) = validate_vin(vin) {
                issues.push(ValidationIssue::new(subject.clone(), e));
            } else if !is_valid_vin_check_digit(vin) {
                issues.push(ValidationIssue::new(subject.clone(), "VIN check digit does not match"));
            }
        }
        let latest = latest_logged_mileage(&snapshot.maintenance_logs, &vehicle.id);
        if let Err(e) = validate_odometer_progression(vehicle.mileage, latest) {
            issues.push(ValidationIssue::new(subject, e));
        }
    }

    for program in &snapshot.programs {
        for vehicle_id in &program.assigned_vehicle_ids {
            if snapshot.vehicle(vehicle_id).is_none() {
                issues.push(ValidationIssue::new(
                    format!("program {}", program.id),
                    "Assigned to a vehicle that is not in the snapshot",
                ));
            }
        }
        for task in program.active_tasks() {
            let subject = format!("task {}/{}", program.id, task.id);
            if let Err(e) = validate_task_interval(task) {
                issues.push(ValidationIssue::new(subject.clone(), e));
            } else if let Err(e) = validate_dual_completeness(task) {
                issues.push(ValidationIssue::new(subject.clone(), e));
            }
            if let Some(offset) = task.reminder_offset {
                if let Err(e) = validate_reminder_offset(offset) {
                    issues.push(ValidationIssue::new(subject, e));
                }
            }
        }
    }

    for log in &snapshot.maintenance_logs {
        if snapshot.vehicle(&log.vehicle_id).is_none() {
            issues.push(ValidationIssue::new(
                format!("log {}", log.id),
                "Belongs to a vehicle that is not in the snapshot",
            ));
        }
    }

    issues
}
