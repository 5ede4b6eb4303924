//! Vehicle Maintenance Reminder engine
//!
//! Computes which maintenance tasks are overdue, due or coming up for a fleet
//! snapshot, and ranks them by urgency.

pub mod config;
pub mod error;
pub mod services;

use std::path::Path;

use chrono::NaiveDate;
use shared::FleetSnapshot;

pub use config::{Config, EngineSettings};
pub use error::{EngineError, EngineResult};
pub use services::{ReminderCalculationService, VehicleStatusService};

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidDate(value.to_string()))
}

/// Parse a fleet snapshot from JSON text
pub fn parse_snapshot(json: &str) -> EngineResult<FleetSnapshot> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a fleet snapshot file
pub fn load_snapshot(path: &Path) -> EngineResult<FleetSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|source| EngineError::SnapshotRead {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot = parse_snapshot(&json)?;
    tracing::debug!(
        "Loaded snapshot {}: {} vehicles, {} programs, {} logs",
        path.display(),
        snapshot.vehicles.len(),
        snapshot.programs.len(),
        snapshot.maintenance_logs.len()
    );
    Ok(snapshot)
}
