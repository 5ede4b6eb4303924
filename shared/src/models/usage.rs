//! Vehicle usage projection models

use serde::{Deserialize, Serialize};

/// How much the usage figures can be trusted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum UsageConfidence {
    Low,
    Medium,
    High,
}

/// Average distance a vehicle covers, used to project when a mileage
/// threshold will be crossed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUsagePattern {
    pub vehicle_id: String,
    pub average_miles_per_day: f64,
    pub average_miles_per_week: f64,
    pub average_miles_per_month: f64,
    pub average_miles_per_year: f64,
    pub confidence: UsageConfidence,
}

impl VehicleUsagePattern {
    pub fn from_daily(vehicle_id: impl Into<String>, miles_per_day: f64, confidence: UsageConfidence) -> Self {
        let miles_per_day = if miles_per_day.is_finite() {
            miles_per_day.max(0.0)
        } else {
            0.0
        };
        Self {
            vehicle_id: vehicle_id.into(),
            average_miles_per_day: miles_per_day,
            average_miles_per_week: miles_per_day * 7.0,
            average_miles_per_month: miles_per_day * 30.0,
            average_miles_per_year: miles_per_day * 365.0,
            confidence,
        }
    }

    /// Whether the pattern can project anything at all
    pub fn has_rate(&self) -> bool {
        self.average_miles_per_day > 0.0
    }
}
