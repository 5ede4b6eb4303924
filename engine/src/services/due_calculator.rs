//! Due-status computation for a single task on a single vehicle
//!
//! A task is tracked on up to two independent axes: distance since the last
//! service and calendar time since the last service. Each axis classifies
//! itself as upcoming, due or overdue (or not worth showing), and a dual task
//! reports whichever axis is more urgent.

use chrono::NaiveDate;
use shared::{
    format_miles, BaselineSource, IntervalType, MaintenanceLog, OverdueBy, ProgramTask, ReminderPriority,
    ReminderStatus, Vehicle, VehicleUsagePattern,
};

use crate::config::EngineSettings;
use crate::services::usage::estimate_crossing_date;

/// Point from which the next service is counted
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub mileage: u32,
    pub date: NaiveDate,
    pub source: BaselineSource,
}

/// Distance axis of a task
#[derive(Debug, Clone, PartialEq)]
pub struct MileageAxis {
    pub interval: u32,
    pub due_mileage: u32,
    pub miles_remaining: u32,
    pub overdue_miles: u32,
    pub estimated_due_date: Option<NaiveDate>,
    pub status: Option<ReminderStatus>,
}

/// Calendar axis of a task
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub due_date: NaiveDate,
    /// Negative once the due date has passed
    pub days_remaining: i64,
    pub overdue_days: u32,
    pub status: Option<ReminderStatus>,
}

/// Which axis decided the status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivingAxis {
    Mileage,
    Time,
}

/// Result of evaluating one task against one vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct DueStatus {
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub due_type: IntervalType,
    pub driving_axis: DrivingAxis,
    pub mileage: Option<MileageAxis>,
    pub time: Option<TimeAxis>,
    pub description: String,
}

impl DueStatus {
    pub fn due_mileage(&self) -> Option<u32> {
        self.mileage.as_ref().map(|m| m.due_mileage)
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.time.as_ref().map(|t| t.due_date)
    }

    pub fn estimated_due_date(&self) -> Option<NaiveDate> {
        self.mileage.as_ref().and_then(|m| m.estimated_due_date)
    }

    pub fn overdue_miles(&self) -> Option<u32> {
        self.mileage.as_ref().map(|m| m.overdue_miles).filter(|v| *v > 0)
    }

    pub fn overdue_days(&self) -> Option<u32> {
        self.time.as_ref().map(|t| t.overdue_days).filter(|v| *v > 0)
    }

    /// Overdue magnitude on the axis that drove the status
    pub fn overdue_by(&self) -> Option<OverdueBy> {
        if self.status != ReminderStatus::Overdue {
            return None;
        }
        match self.driving_axis {
            DrivingAxis::Mileage => self.overdue_miles().map(OverdueBy::Miles),
            DrivingAxis::Time => self.overdue_days().map(OverdueBy::Days),
        }
    }
}

/// Evaluates tasks against the configured thresholds
#[derive(Debug, Clone, Default)]
pub struct DueCalculator {
    settings: EngineSettings,
}

impl DueCalculator {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Baseline from the last matching service, or a rough estimate when the
    /// task has never been logged: one interval below the current odometer,
    /// dated at vehicle creation.
    pub fn resolve_baseline(
        &self,
        task: &ProgramTask,
        vehicle: &Vehicle,
        last_service: Option<&MaintenanceLog>,
    ) -> Baseline {
        match last_service {
            Some(log) => Baseline {
                mileage: log.mileage,
                date: log.date,
                source: BaselineSource::LastService,
            },
            None => {
                let interval = task
                    .mileage_interval()
                    .unwrap_or(self.settings.fallback_mileage_interval);
                Baseline {
                    mileage: vehicle.mileage.saturating_sub(interval),
                    date: vehicle.created_at.date_naive(),
                    source: BaselineSource::Estimated,
                }
            }
        }
    }

    /// Status of `task` on `vehicle` as of `as_of`.
    ///
    /// Returns `None` when the task has no usable interval or when nothing
    /// about it needs attention within its reminder window.
    pub fn compute_due_status(
        &self,
        task: &ProgramTask,
        vehicle: &Vehicle,
        baseline: &Baseline,
        pattern: &VehicleUsagePattern,
        as_of: NaiveDate,
    ) -> Option<DueStatus> {
        let offset = task.reminder_offset_days(self.settings.default_reminder_offset_days);
        let mileage = self.evaluate_mileage(task, vehicle, baseline, pattern, offset, as_of);
        let time = self.evaluate_time(task, baseline, offset, as_of);

        let mileage_status = mileage.as_ref().and_then(|m| m.status);
        let time_status = time.as_ref().and_then(|t| t.status);

        let driving_axis = match (mileage_status, time_status) {
            (None, None) => return None,
            (Some(_), None) => DrivingAxis::Mileage,
            (None, Some(_)) => DrivingAxis::Time,
            (Some(ms), Some(ts)) if ms != ts => {
                if ts > ms {
                    DrivingAxis::Time
                } else {
                    DrivingAxis::Mileage
                }
            }
            (Some(_), Some(_)) => {
                let mileage_urgency = mileage.as_ref().and_then(|m| mileage_urgency_days(m, pattern));
                let time_urgency = time.as_ref().map(time_urgency_days);
                match (mileage_urgency, time_urgency) {
                    (Some(m), Some(t)) if t > m => DrivingAxis::Time,
                    (None, Some(_)) => DrivingAxis::Time,
                    _ => DrivingAxis::Mileage,
                }
            }
        };

        let status = match driving_axis {
            DrivingAxis::Mileage => mileage_status?,
            DrivingAxis::Time => time_status?,
        };
        let priority = self.assign_priority(status, mileage.as_ref(), time.as_ref());
        let description = match driving_axis {
            DrivingAxis::Mileage => describe_mileage(status, mileage.as_ref()?),
            DrivingAxis::Time => describe_time(status, time.as_ref()?),
        };

        Some(DueStatus {
            status,
            priority,
            due_type: task.interval_type,
            driving_axis,
            mileage,
            time,
            description,
        })
    }

    /// Priority from status, escalating overdue items past either threshold
    pub fn assign_priority(
        &self,
        status: ReminderStatus,
        mileage: Option<&MileageAxis>,
        time: Option<&TimeAxis>,
    ) -> ReminderPriority {
        match status {
            ReminderStatus::Overdue => {
                let miles_critical = mileage.is_some_and(|m| {
                    f64::from(m.overdue_miles) > self.settings.critical_mileage_fraction * f64::from(m.interval)
                });
                let days_critical = time.is_some_and(|t| t.overdue_days > self.settings.critical_overdue_days);
                if miles_critical || days_critical {
                    ReminderPriority::Critical
                } else {
                    ReminderPriority::High
                }
            }
            ReminderStatus::Due => ReminderPriority::High,
            ReminderStatus::Upcoming => ReminderPriority::Medium,
        }
    }

    fn evaluate_mileage(
        &self,
        task: &ProgramTask,
        vehicle: &Vehicle,
        baseline: &Baseline,
        pattern: &VehicleUsagePattern,
        offset_days: u32,
        as_of: NaiveDate,
    ) -> Option<MileageAxis> {
        let interval = task.mileage_interval()?;
        let due_mileage = self.round_due_mileage(baseline.mileage.saturating_add(interval));
        let current = vehicle.mileage;

        let overdue_miles = current.saturating_sub(due_mileage);
        let miles_remaining = due_mileage.saturating_sub(current);
        let estimated_due_date = if overdue_miles > 0 {
            None
        } else {
            estimate_crossing_date(as_of, miles_remaining, pattern)
        };

        let due_threshold = f64::from(due_mileage) - self.settings.mileage_due_fraction * f64::from(interval);
        let status = if overdue_miles > 0 {
            Some(ReminderStatus::Overdue)
        } else if f64::from(current) >= due_threshold {
            Some(ReminderStatus::Due)
        } else {
            estimated_due_date
                .filter(|estimate| (*estimate - as_of).num_days() <= i64::from(offset_days))
                .map(|_| ReminderStatus::Upcoming)
        };

        Some(MileageAxis {
            interval,
            due_mileage,
            miles_remaining,
            overdue_miles,
            estimated_due_date,
            status,
        })
    }

    fn evaluate_time(
        &self,
        task: &ProgramTask,
        baseline: &Baseline,
        offset_days: u32,
        as_of: NaiveDate,
    ) -> Option<TimeAxis> {
        let (amount, unit) = task.time_interval()?;
        let due_date = unit.add_to(baseline.date, amount)?;

        let days_remaining = (due_date - as_of).num_days();
        let overdue_days = u32::try_from((-days_remaining).max(0)).unwrap_or(u32::MAX);

        let status = if overdue_days > 0 {
            Some(ReminderStatus::Overdue)
        } else if days_remaining <= i64::from(self.settings.due_soon_days) {
            Some(ReminderStatus::Due)
        } else if days_remaining <= i64::from(offset_days) {
            Some(ReminderStatus::Upcoming)
        } else {
            None
        };

        Some(TimeAxis {
            due_date,
            days_remaining,
            overdue_days,
            status,
        })
    }

    fn round_due_mileage(&self, due: u32) -> u32 {
        match self.settings.due_mileage_rounding.filter(|r| *r > 1) {
            Some(step) => {
                let rounded = u64::from(due).div_ceil(u64::from(step)) * u64::from(step);
                u32::try_from(rounded).unwrap_or(u32::MAX)
            }
            None => due,
        }
    }
}

/// Days past due (positive) or until due (negative), converted with the usage rate
fn mileage_urgency_days(axis: &MileageAxis, pattern: &VehicleUsagePattern) -> Option<f64> {
    if !pattern.has_rate() {
        return None;
    }
    if axis.overdue_miles > 0 {
        Some(f64::from(axis.overdue_miles) / pattern.average_miles_per_day)
    } else {
        Some(-(f64::from(axis.miles_remaining) / pattern.average_miles_per_day))
    }
}

fn time_urgency_days(axis: &TimeAxis) -> f64 {
    -(axis.days_remaining as f64)
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", n, many)
    }
}

fn describe_mileage(status: ReminderStatus, axis: &MileageAxis) -> String {
    match status {
        ReminderStatus::Overdue => format!("Overdue by {} miles", format_miles(axis.overdue_miles)),
        ReminderStatus::Due if axis.miles_remaining == 0 => {
            format!("Due now at {} miles", format_miles(axis.due_mileage))
        }
        ReminderStatus::Due => format!(
            "Due in {} miles (at {})",
            format_miles(axis.miles_remaining),
            format_miles(axis.due_mileage)
        ),
        ReminderStatus::Upcoming => match axis.estimated_due_date {
            Some(date) => format!(
                "Due in {} miles, around {}",
                format_miles(axis.miles_remaining),
                date.format("%b %-d, %Y")
            ),
            None => format!("Due at {} miles", format_miles(axis.due_mileage)),
        },
    }
}

fn describe_time(status: ReminderStatus, axis: &TimeAxis) -> String {
    match status {
        ReminderStatus::Overdue => format!("Overdue by {}", plural(u64::from(axis.overdue_days), "day", "days")),
        _ => match axis.days_remaining {
            0 => "Due today".to_string(),
            1 => "Due tomorrow".to_string(),
            n => format!(
                "Due in {} ({})",
                plural(n.unsigned_abs(), "day", "days"),
                axis.due_date.format("%b %-d, %Y")
            ),
        },
    }
}
