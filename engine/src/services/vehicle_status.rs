//! Per-vehicle status view built on the reminder calculation

use chrono::NaiveDate;
use shared::{
    FleetSnapshot, MaintenanceLog, MaintenanceProgram, OverallStatus, ReminderCalculationResult, ReminderItem,
    ReminderStatus, Vehicle, VehicleStatusSummary,
};

use crate::error::{EngineError, EngineResult};
use crate::services::reminder::ReminderCalculationService;

/// Vehicle status service
pub struct VehicleStatusService {
    reminders: ReminderCalculationService,
}

impl Default for VehicleStatusService {
    fn default() -> Self {
        Self::new(ReminderCalculationService::default())
    }
}

impl VehicleStatusService {
    pub fn new(reminders: ReminderCalculationService) -> Self {
        Self { reminders }
    }

    /// Status summary for one vehicle
    pub fn vehicle_status(
        &self,
        vehicle: &Vehicle,
        programs: &[MaintenanceProgram],
        logs: Option<&[MaintenanceLog]>,
        as_of: NaiveDate,
    ) -> VehicleStatusSummary {
        let result = self.reminders.calculate_for_vehicle(vehicle, programs, logs, as_of);
        summarize(vehicle, result.reminders)
    }

    /// Status summaries for every vehicle, in input order
    pub fn fleet_status(
        &self,
        vehicles: &[Vehicle],
        programs: &[MaintenanceProgram],
        logs: Option<&[MaintenanceLog]>,
        as_of: NaiveDate,
    ) -> Vec<VehicleStatusSummary> {
        let result = self.reminders.calculate(vehicles, programs, logs, as_of);
        split_by_vehicle(vehicles, &result)
    }

    /// Status summary for one vehicle of a snapshot, looked up by id
    pub fn snapshot_vehicle_status(
        &self,
        snapshot: &FleetSnapshot,
        vehicle_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<VehicleStatusSummary> {
        let vehicle = snapshot
            .vehicle(vehicle_id)
            .ok_or_else(|| EngineError::VehicleNotFound(vehicle_id.to_string()))?;

        Ok(self.vehicle_status(
            vehicle,
            &snapshot.programs,
            Some(&snapshot.maintenance_logs),
            as_of,
        ))
    }
}

fn split_by_vehicle(vehicles: &[Vehicle], result: &ReminderCalculationResult) -> Vec<VehicleStatusSummary> {
    vehicles
        .iter()
        .map(|vehicle| summarize(vehicle, result.for_vehicle(&vehicle.id).cloned().collect()))
        .collect()
}

/// Splits an already ranked list into the summary's overdue and upcoming views
fn summarize(vehicle: &Vehicle, ranked: Vec<ReminderItem>) -> VehicleStatusSummary {
    let (overdue_services, upcoming_services): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .partition(|item| item.status == ReminderStatus::Overdue);

    let overall_status = if !overdue_services.is_empty() {
        OverallStatus::Overdue
    } else if !upcoming_services.is_empty() {
        OverallStatus::Attention
    } else {
        OverallStatus::UpToDate
    };

    VehicleStatusSummary {
        vehicle_id: vehicle.id.clone(),
        vehicle_name: vehicle.display_name(),
        next_service_due: upcoming_services.first().cloned(),
        total_overdue_count: overdue_services.len(),
        overdue_services,
        upcoming_services,
        overall_status,
    }
}
