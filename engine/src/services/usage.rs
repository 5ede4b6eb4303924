//! Usage-rate estimation and mileage crossing projection

use chrono::{Days, NaiveDate};
use shared::{MaintenanceLog, UsageConfidence, Vehicle, VehicleUsagePattern};

/// Produces a usage pattern for a vehicle
pub trait UsageEstimator: Send + Sync {
    fn estimate(&self, vehicle: &Vehicle, history: &[MaintenanceLog], as_of: NaiveDate) -> VehicleUsagePattern;
}

/// Same fixed rate for every vehicle
#[derive(Debug, Clone)]
pub struct StaticUsageEstimator {
    miles_per_day: f64,
}

impl StaticUsageEstimator {
    pub fn new(miles_per_day: f64) -> Self {
        Self { miles_per_day }
    }
}

impl Default for StaticUsageEstimator {
    fn default() -> Self {
        Self::new(35.0)
    }
}

impl UsageEstimator for StaticUsageEstimator {
    fn estimate(&self, vehicle: &Vehicle, _history: &[MaintenanceLog], _as_of: NaiveDate) -> VehicleUsagePattern {
        VehicleUsagePattern::from_daily(vehicle.id.clone(), self.miles_per_day, UsageConfidence::Low)
    }
}

/// Derives the rate from the vehicle's own odometer history.
///
/// The rate runs from the earliest log to the current odometer reading on
/// `as_of`. Too little history falls back to the static rate.
#[derive(Debug, Clone)]
pub struct HistoryUsageEstimator {
    fallback: StaticUsageEstimator,
    min_span_days: i64,
}

impl HistoryUsageEstimator {
    pub fn new(fallback: StaticUsageEstimator) -> Self {
        Self {
            fallback,
            min_span_days: 30,
        }
    }

    pub fn with_min_span_days(mut self, days: i64) -> Self {
        self.min_span_days = days.max(1);
        self
    }
}

impl Default for HistoryUsageEstimator {
    fn default() -> Self {
        Self::new(StaticUsageEstimator::default())
    }
}

impl UsageEstimator for HistoryUsageEstimator {
    fn estimate(&self, vehicle: &Vehicle, history: &[MaintenanceLog], as_of: NaiveDate) -> VehicleUsagePattern {
        let logs: Vec<&MaintenanceLog> = history
            .iter()
            .filter(|log| log.vehicle_id == vehicle.id && log.date <= as_of)
            .collect();

        let earliest = match logs.iter().min_by_key(|log| (log.date, log.mileage)) {
            Some(log) => *log,
            None => return self.fallback.estimate(vehicle, history, as_of),
        };

        let span_days = (as_of - earliest.date).num_days();
        let miles = i64::from(vehicle.mileage) - i64::from(earliest.mileage);
        if span_days < self.min_span_days || miles <= 0 {
            tracing::debug!(
                "Not enough usage history for vehicle {} ({} days, {} miles); using fallback rate",
                vehicle.id,
                span_days,
                miles
            );
            return self.fallback.estimate(vehicle, history, as_of);
        }

        // Current odometer counts as one more reading
        let points = logs.len() + 1;
        let confidence = if points >= 5 && span_days >= 180 {
            UsageConfidence::High
        } else {
            UsageConfidence::Medium
        };

        VehicleUsagePattern::from_daily(vehicle.id.clone(), miles as f64 / span_days as f64, confidence)
    }
}

/// Date a vehicle is projected to cover `miles_remaining` more miles.
///
/// Partial days round up. No projection without a positive rate.
pub fn estimate_crossing_date(
    as_of: NaiveDate,
    miles_remaining: u32,
    pattern: &VehicleUsagePattern,
) -> Option<NaiveDate> {
    if !pattern.has_rate() {
        return None;
    }
    let days = (f64::from(miles_remaining) / pattern.average_miles_per_day).ceil();
    if !days.is_finite() || days > 36_500.0 {
        return None;
    }
    as_of.checked_add_days(Days::new(days as u64))
}
