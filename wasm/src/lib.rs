//! WebAssembly module for the Vehicle Maintenance Reminder engine
//!
//! Lets the app compute reminders on the device, including offline:
//! - Ranked reminder lists
//! - Per-vehicle status summaries
//! - Snapshot data-quality checks
//! - Interval descriptions for task forms
//!
//! All functions take and return JSON strings.

use chrono::NaiveDate;
use maintenance_engine::services::export_to_csv;
use maintenance_engine::{
    parse_date, parse_snapshot, EngineError, EngineResult, EngineSettings, ReminderCalculationService,
    VehicleStatusService,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

fn to_js_error(e: EngineError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", e.code(), e))
}

/// Today's date as seen by the host
#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

fn resolve_as_of(as_of: Option<String>) -> EngineResult<NaiveDate> {
    match as_of.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(value) => parse_date(value),
        None => Ok(today()),
    }
}

fn service() -> ReminderCalculationService {
    ReminderCalculationService::new(EngineSettings::default())
}

pub fn reminders_json(snapshot_json: &str, as_of: Option<String>) -> EngineResult<String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let as_of = resolve_as_of(as_of)?;

    let issues = shared::validate_snapshot(&snapshot, chrono::Datelike::year(&as_of));
    if !issues.is_empty() {
        warn(&format!("Snapshot has {} data-quality issues", issues.len()));
    }

    let result = service().calculate_snapshot(&snapshot, as_of);
    Ok(serde_json::to_string(&result)?)
}

pub fn reminders_csv(snapshot_json: &str, as_of: Option<String>) -> EngineResult<String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let result = service().calculate_snapshot(&snapshot, resolve_as_of(as_of)?);
    export_to_csv(&result.reminders)
}

pub fn status_json(snapshot_json: &str, vehicle_id: Option<String>, as_of: Option<String>) -> EngineResult<String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let as_of = resolve_as_of(as_of)?;
    let status = VehicleStatusService::new(service());

    match vehicle_id {
        Some(id) => Ok(serde_json::to_string(&status.snapshot_vehicle_status(&snapshot, &id, as_of)?)?),
        None => {
            let summaries = status.fleet_status(
                &snapshot.vehicles,
                &snapshot.programs,
                Some(&snapshot.maintenance_logs),
                as_of,
            );
            Ok(serde_json::to_string(&summaries)?)
        }
    }
}

pub fn validation_json(snapshot_json: &str, current_year: i32) -> EngineResult<String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let issues = shared::validate_snapshot(&snapshot, current_year);
    Ok(serde_json::to_string(&issues)?)
}

/// Compute the ranked reminder list for a fleet snapshot
#[wasm_bindgen]
pub fn calculate_reminders(snapshot_json: &str, as_of: Option<String>) -> Result<String, JsValue> {
    reminders_json(snapshot_json, as_of).map_err(to_js_error)
}

/// Compute the ranked reminder list as CSV
#[wasm_bindgen]
pub fn export_reminders_csv(snapshot_json: &str, as_of: Option<String>) -> Result<String, JsValue> {
    reminders_csv(snapshot_json, as_of).map_err(to_js_error)
}

/// Status summary for one vehicle, or for every vehicle when no id is given
#[wasm_bindgen]
pub fn vehicle_status(snapshot_json: &str, vehicle_id: Option<String>, as_of: Option<String>) -> Result<String, JsValue> {
    status_json(snapshot_json, vehicle_id, as_of).map_err(to_js_error)
}

/// Data-quality warnings for a snapshot
#[wasm_bindgen]
pub fn validate_snapshot(snapshot_json: &str) -> Result<String, JsValue> {
    let year = chrono::Datelike::year(&today());
    validation_json(snapshot_json, year).map_err(to_js_error)
}

/// Human-readable interval of a task, e.g. "Every 5,000 miles or 6 months"
#[wasm_bindgen]
pub fn describe_task_interval(task_json: &str) -> Result<String, JsValue> {
    let task: ProgramTask = serde_json::from_str(task_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid task JSON: {}", e)))?;
    Ok(task.interval_description())
}

/// Format a mileage with thousands separators
#[wasm_bindgen]
pub fn format_mileage(miles: u32) -> String {
    format_miles(miles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "vehicles": [{
            "id": "veh-1",
            "make": "Toyota",
            "model": "Camry",
            "year": 2019,
            "mileage": 50000,
            "createdAt": "2024-01-01T00:00:00Z"
        }],
        "programs": [{
            "id": "basic",
            "name": "Basic Care",
            "assignedVehicleIds": ["veh-1"],
            "isActive": true,
            "tasks": [{
                "id": "oil",
                "name": "Oil Change",
                "category": "Engine",
                "intervalType": "mileage",
                "intervalValue": 5000
            }]
        }],
        "maintenanceLogs": [{
            "id": "log-1",
            "vehicleId": "veh-1",
            "date": "2024-02-01",
            "mileage": 42000,
            "title": "Oil change",
            "services": []
        }]
    }"#;

    #[test]
    fn test_reminders_json() {
        let json = reminders_json(SNAPSHOT, Some("2024-06-01".to_string())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["overdue"], 1);
        assert_eq!(value["reminders"][0]["priority"], "critical");
        assert_eq!(value["reminders"][0]["overdueMiles"], 3000);
    }

    #[test]
    fn test_reminders_rejects_bad_input() {
        assert_eq!(
            reminders_json("not json", None).unwrap_err().code(),
            "SNAPSHOT_PARSE"
        );
        assert_eq!(
            reminders_json(SNAPSHOT, Some("June 1".to_string())).unwrap_err().code(),
            "INVALID_DATE"
        );
    }

    #[test]
    fn test_reminders_csv() {
        let csv = reminders_csv(SNAPSHOT, Some("2024-06-01".to_string())).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_status_json() {
        let json = status_json(SNAPSHOT, Some("veh-1".to_string()), Some("2024-06-01".to_string())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overallStatus"], "overdue");
        assert_eq!(value["totalOverdueCount"], 1);

        let err = status_json(SNAPSHOT, Some("veh-9".to_string()), None).unwrap_err();
        assert_eq!(err.code(), "VEHICLE_NOT_FOUND");
    }

    #[test]
    fn test_validation_json() {
        let json = validation_json(SNAPSHOT, 2024).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_describe_task_interval() {
        let task = r#"{"id":"oil","name":"Oil Change","category":"Engine","intervalType":"mileage","intervalValue":5000}"#;
        assert_eq!(describe_task_interval(task).unwrap(), "Every 5,000 miles");
    }

    #[test]
    fn test_format_mileage() {
        assert_eq!(format_mileage(1234567), "1,234,567");
    }
}
