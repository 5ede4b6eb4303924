//! Maintenance history models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed service entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: String,
    pub vehicle_id: String,
    pub date: NaiveDate,
    /// Odometer reading when the service was completed
    pub mileage: u32,
    pub title: String,
    /// Named services performed during the visit
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Program tasks this entry explicitly completes, when the app recorded them
    #[serde(default)]
    pub program_task_ids: Vec<String>,
}

/// Sum of recorded costs for one vehicle; entries without a cost count as zero
pub fn total_spend(logs: &[MaintenanceLog], vehicle_id: &str) -> Decimal {
    logs.iter()
        .filter(|log| log.vehicle_id == vehicle_id)
        .filter_map(|log| log.cost)
        .sum()
}

/// Most recent odometer reading recorded in the history for a vehicle
pub fn latest_logged_mileage(logs: &[MaintenanceLog], vehicle_id: &str) -> Option<u32> {
    logs.iter()
        .filter(|log| log.vehicle_id == vehicle_id)
        .max_by_key(|log| (log.date, log.mileage))
        .map(|log| log.mileage)
}
