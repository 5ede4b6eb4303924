//! Due-status services for the Vehicle Maintenance Reminder engine

pub mod due_calculator;
pub mod prioritizer;
pub mod reminder;
pub mod reporting;
pub mod task_matcher;
pub mod usage;
pub mod vehicle_status;

pub use due_calculator::{Baseline, DrivingAxis, DueCalculator, DueStatus, MileageAxis, TimeAxis};
pub use prioritizer::{compare_urgency, rank_and_summarize};
pub use reminder::ReminderCalculationService;
pub use reporting::{build_report, export_to_csv};
pub use task_matcher::{find_last_service, KeywordMatcher, LinkedTaskMatcher, TaskMatcher};
pub use usage::{estimate_crossing_date, HistoryUsageEstimator, StaticUsageEstimator, UsageEstimator};
pub use vehicle_status::VehicleStatusService;
