//! Reminder calculation service
//!
//! Runs every active task of every assigned program against each vehicle and
//! returns a ranked, filtered reminder list. Each call works only on the data
//! passed in and keeps nothing between calls.

use chrono::NaiveDate;
use shared::{
    validate_task_interval, BaselineSource, FleetSnapshot, MaintenanceLog, MaintenanceProgram, ProgramTask,
    ReminderCalculationResult, ReminderItem, Vehicle, VehicleUsagePattern,
};

use crate::config::EngineSettings;
use crate::services::due_calculator::{Baseline, DueCalculator, DueStatus};
use crate::services::prioritizer::rank_and_summarize;
use crate::services::task_matcher::{find_last_service, KeywordMatcher, TaskMatcher};
use crate::services::usage::{StaticUsageEstimator, UsageEstimator};

/// Reminder calculation service
pub struct ReminderCalculationService {
    calculator: DueCalculator,
    matcher: Box<dyn TaskMatcher>,
    usage: Box<dyn UsageEstimator>,
}

impl Default for ReminderCalculationService {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl ReminderCalculationService {
    /// Create a service with the keyword matcher and a static usage rate
    pub fn new(settings: EngineSettings) -> Self {
        let usage = StaticUsageEstimator::new(settings.default_miles_per_day);
        Self {
            calculator: DueCalculator::new(settings),
            matcher: Box::new(KeywordMatcher::default()),
            usage: Box::new(usage),
        }
    }

    pub fn with_matcher(mut self, matcher: impl TaskMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn with_usage_estimator(mut self, usage: impl UsageEstimator + 'static) -> Self {
        self.usage = Box::new(usage);
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        self.calculator.settings()
    }

    /// Compute reminders for every vehicle.
    ///
    /// `logs` may be absent; every task is then measured from its estimated
    /// baseline.
    pub fn calculate(
        &self,
        vehicles: &[Vehicle],
        programs: &[MaintenanceProgram],
        logs: Option<&[MaintenanceLog]>,
        as_of: NaiveDate,
    ) -> ReminderCalculationResult {
        let history = logs.unwrap_or(&[]);
        let mut reminders = Vec::new();
        let mut vehicle_patterns = Vec::with_capacity(vehicles.len());

        for vehicle in vehicles {
            let pattern = self.usage.estimate(vehicle, history, as_of);
            reminders.extend(self.reminders_for_vehicle(vehicle, &pattern, programs, history, as_of));
            vehicle_patterns.push(pattern);
        }

        let (reminders, summary) = rank_and_summarize(reminders);

        tracing::info!(
            "Calculated {} reminders for {} vehicles ({} overdue, {} critical)",
            summary.total,
            vehicles.len(),
            summary.overdue,
            summary.critical
        );

        ReminderCalculationResult {
            reminders,
            vehicle_patterns,
            summary,
        }
    }

    pub fn calculate_snapshot(&self, snapshot: &FleetSnapshot, as_of: NaiveDate) -> ReminderCalculationResult {
        self.calculate(
            &snapshot.vehicles,
            &snapshot.programs,
            Some(&snapshot.maintenance_logs),
            as_of,
        )
    }

    /// Compute reminders for a single vehicle
    pub fn calculate_for_vehicle(
        &self,
        vehicle: &Vehicle,
        programs: &[MaintenanceProgram],
        logs: Option<&[MaintenanceLog]>,
        as_of: NaiveDate,
    ) -> ReminderCalculationResult {
        self.calculate(std::slice::from_ref(vehicle), programs, logs, as_of)
    }

    fn reminders_for_vehicle(
        &self,
        vehicle: &Vehicle,
        pattern: &VehicleUsagePattern,
        programs: &[MaintenanceProgram],
        history: &[MaintenanceLog],
        as_of: NaiveDate,
    ) -> Vec<ReminderItem> {
        let mut items = Vec::new();

        for program in programs.iter().filter(|p| p.applies_to(&vehicle.id)) {
            for task in program.active_tasks() {
                if let Err(reason) = validate_task_interval(task) {
                    tracing::debug!(
                        "Skipping task {} in program {}: {}",
                        task.id,
                        program.id,
                        reason
                    );
                    continue;
                }

                let last_service = find_last_service(self.matcher.as_ref(), &vehicle.id, task, history);
                let baseline = self.calculator.resolve_baseline(task, vehicle, last_service);

                match self
                    .calculator
                    .compute_due_status(task, vehicle, &baseline, pattern, as_of)
                {
                    Some(due) => items.push(build_item(program, task, vehicle, &baseline, due)),
                    None => tracing::debug!(
                        "Task {} on vehicle {} needs no attention yet",
                        task.id,
                        vehicle.id
                    ),
                }
            }
        }

        items
    }
}

fn build_item(
    program: &MaintenanceProgram,
    task: &ProgramTask,
    vehicle: &Vehicle,
    baseline: &Baseline,
    due: DueStatus,
) -> ReminderItem {
    let serviced = baseline.source == BaselineSource::LastService;

    ReminderItem {
        id: ReminderItem::composite_id(&program.id, &task.id, &vehicle.id),
        program_id: program.id.clone(),
        task_id: task.id.clone(),
        vehicle_id: vehicle.id.clone(),
        task_name: task.name.clone(),
        task_category: task.category.clone(),
        vehicle_name: vehicle.display_name(),
        program_name: program.name.clone(),
        status: due.status,
        priority: due.priority,
        due_type: due.due_type,
        current_mileage: vehicle.mileage,
        due_mileage: due.due_mileage(),
        due_date: due.due_date(),
        miles_remaining: due.mileage.as_ref().map(|m| m.miles_remaining),
        days_remaining: due.time.as_ref().map(|t| t.days_remaining.max(0)),
        overdue_miles: due.overdue_miles(),
        overdue_days: due.overdue_days(),
        overdue_by: due.overdue_by(),
        estimated_due_date: due.estimated_due_date(),
        last_service_date: serviced.then_some(baseline.date),
        last_service_mileage: serviced.then_some(baseline.mileage),
        baseline_source: baseline.source,
        description: due.description,
    }
}
