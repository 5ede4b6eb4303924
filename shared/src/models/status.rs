//! Per-vehicle status view

use serde::{Deserialize, Serialize};

use crate::models::ReminderItem;

/// Headline state of a single vehicle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OverallStatus {
    UpToDate,
    /// Something is due now or coming up soon
    Attention,
    Overdue,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::UpToDate => write!(f, "Up to date"),
            OverallStatus::Attention => write!(f, "Service soon"),
            OverallStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusSummary {
    pub vehicle_id: String,
    pub vehicle_name: String,
    /// Highest-ranked item that is not yet overdue
    pub next_service_due: Option<ReminderItem>,
    pub overdue_services: Vec<ReminderItem>,
    /// Due and upcoming items, most urgent first
    pub upcoming_services: Vec<ReminderItem>,
    pub total_overdue_count: usize,
    pub overall_status: OverallStatus,
}
