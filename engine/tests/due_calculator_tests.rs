//! Due calculator tests
//!
//! Tests for single-task due-status evaluation including:
//! - Mileage, time and dual interval classification
//! - Critical escalation at the overdue thresholds
//! - Monotonic status as mileage and time advance
//! - Whichever-comes-first combination of dual tasks

use chrono::{Days, NaiveDate, TimeZone, Utc};
use maintenance_engine::services::{Baseline, DrivingAxis, DueCalculator};
use maintenance_engine::EngineSettings;
use proptest::prelude::*;
use shared::{
    BaselineSource, IntervalType, ProgramTask, ReminderPriority, ReminderStatus, TimeUnit, UsageConfidence, Vehicle,
    VehicleUsagePattern,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn vehicle(mileage: u32) -> Vehicle {
    Vehicle {
        id: "veh-1".to_string(),
        make: "Ford".to_string(),
        model: "Focus".to_string(),
        year: 2017,
        nickname: None,
        vin: None,
        mileage,
        created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn task(interval_type: IntervalType, miles: Option<u32>, months: Option<u32>) -> ProgramTask {
    ProgramTask {
        id: "task".to_string(),
        name: "Service".to_string(),
        description: None,
        category: "General".to_string(),
        interval_type,
        interval_value: miles,
        time_interval_value: months,
        time_interval_unit: months.map(|_| TimeUnit::Months),
        reminder_offset: None,
        is_active: true,
    }
}

fn baseline(mileage: u32, date: NaiveDate) -> Baseline {
    Baseline {
        mileage,
        date,
        source: BaselineSource::LastService,
    }
}

fn pattern() -> VehicleUsagePattern {
    VehicleUsagePattern::from_daily("veh-1", 35.0, UsageConfidence::Low)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    // =========================================================================
    // Mileage axis
    // =========================================================================

    #[test]
    fn test_far_from_due_is_not_reported() {
        let calc = DueCalculator::default();
        let status = calc.compute_due_status(
            &task(IntervalType::Mileage, Some(5000), None),
            &vehicle(41_000),
            &baseline(40_000, date(2024, 1, 1)),
            &pattern(),
            date(2024, 6, 1),
        );
        assert!(status.is_none());
    }

    #[test]
    fn test_upcoming_when_projection_inside_offset() {
        let calc = DueCalculator::default();
        // 4,400 miles used of 5,000; 600 left; threshold is 4,500 -> not due yet.
        // 600 / 35 = 17.1 days, outside 7 day offset. With 30-day offset it shows.
        let mut t = task(IntervalType::Mileage, Some(5000), None);
        t.reminder_offset = Some(30);
        let status = calc
            .compute_due_status(&t, &vehicle(44_400), &baseline(40_000, date(2024, 1, 1)), &pattern(), date(2024, 6, 1))
            .unwrap();
        assert_eq!(status.status, ReminderStatus::Upcoming);
        assert_eq!(status.priority, ReminderPriority::Medium);
        assert_eq!(status.estimated_due_date(), Some(date(2024, 6, 19)));
        assert_eq!(status.description, "Due in 600 miles, around Jun 19, 2024");
    }

    #[test]
    fn test_due_within_ten_percent() {
        let calc = DueCalculator::default();
        let status = calc
            .compute_due_status(
                &task(IntervalType::Mileage, Some(5000), None),
                &vehicle(44_500),
                &baseline(40_000, date(2024, 1, 1)),
                &pattern(),
                date(2024, 6, 1),
            )
            .unwrap();
        assert_eq!(status.status, ReminderStatus::Due);
        assert_eq!(status.priority, ReminderPriority::High);
        assert_eq!(status.description, "Due in 500 miles (at 45,000)");
    }

    #[test]
    fn test_overdue_escalation_boundary() {
        let calc = DueCalculator::default();
        let t = task(IntervalType::Mileage, Some(5000), None);
        let base = baseline(45_000, date(2024, 1, 1));

        let at_threshold = calc
            .compute_due_status(&t, &vehicle(50_500), &base, &pattern(), date(2024, 6, 1))
            .unwrap();
        assert_eq!(at_threshold.status, ReminderStatus::Overdue);
        assert_eq!(at_threshold.priority, ReminderPriority::High);

        let past_threshold = calc
            .compute_due_status(&t, &vehicle(50_501), &base, &pattern(), date(2024, 6, 1))
            .unwrap();
        assert_eq!(past_threshold.priority, ReminderPriority::Critical);
        assert_eq!(past_threshold.description, "Overdue by 501 miles");
    }

    // =========================================================================
    // Time axis
    // =========================================================================

    #[test]
    fn test_time_task_outside_offset_is_excluded() {
        let calc = DueCalculator::default();
        // Due 2024-07-01, 30 days away with default 7 day offset
        let status = calc.compute_due_status(
            &task(IntervalType::Time, None, Some(6)),
            &vehicle(10_000),
            &baseline(10_000, date(2024, 1, 1)),
            &pattern(),
            date(2024, 6, 1),
        );
        assert!(status.is_none());
    }

    #[test]
    fn test_time_task_overdue_critical_after_thirty_days() {
        let calc = DueCalculator::default();
        let t = task(IntervalType::Time, None, Some(6));
        let base = baseline(10_000, date(2024, 1, 1));

        let thirty = calc
            .compute_due_status(&t, &vehicle(10_000), &base, &pattern(), date(2024, 7, 31))
            .unwrap();
        assert_eq!(thirty.overdue_days(), Some(30));
        assert_eq!(thirty.priority, ReminderPriority::High);

        let thirty_one = calc
            .compute_due_status(&t, &vehicle(10_000), &base, &pattern(), date(2024, 8, 1))
            .unwrap();
        assert_eq!(thirty_one.priority, ReminderPriority::Critical);
        assert_eq!(thirty_one.description, "Overdue by 31 days");
    }

    // =========================================================================
    // Dual intervals
    // =========================================================================

    #[test]
    fn test_dual_time_drives_when_more_urgent() {
        let calc = DueCalculator::default();
        // Mileage far from due; time overdue by 10 days
        let status = calc
            .compute_due_status(
                &task(IntervalType::Dual, Some(5000), Some(6)),
                &vehicle(41_000),
                &baseline(40_000, date(2024, 1, 1)),
                &pattern(),
                date(2024, 7, 11),
            )
            .unwrap();
        assert_eq!(status.status, ReminderStatus::Overdue);
        assert_eq!(status.driving_axis, DrivingAxis::Time);
        assert_eq!(status.due_type, IntervalType::Dual);
        assert_eq!(status.due_mileage(), Some(45_000));
        assert_eq!(status.due_date(), Some(date(2024, 7, 1)));
        assert_eq!(status.description, "Overdue by 10 days");
    }

    #[test]
    fn test_custom_thresholds() {
        let settings = EngineSettings {
            critical_overdue_days: 5,
            ..EngineSettings::default()
        };
        let calc = DueCalculator::new(settings);
        let status = calc
            .compute_due_status(
                &task(IntervalType::Time, None, Some(6)),
                &vehicle(10_000),
                &baseline(10_000, date(2024, 1, 1)),
                &pattern(),
                date(2024, 7, 7),
            )
            .unwrap();
        assert_eq!(status.priority, ReminderPriority::Critical);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    fn mileage_status(current: u32, base: u32, interval: u32) -> Option<ReminderStatus> {
        DueCalculator::default()
            .compute_due_status(
                &task(IntervalType::Mileage, Some(interval), None),
                &vehicle(current),
                &baseline(base, date(2024, 1, 1)),
                &pattern(),
                date(2024, 6, 1),
            )
            .map(|s| s.status)
    }

    fn time_status(months: u32, as_of: NaiveDate) -> Option<ReminderStatus> {
        DueCalculator::default()
            .compute_due_status(
                &task(IntervalType::Time, None, Some(months)),
                &vehicle(10_000),
                &baseline(10_000, date(2024, 1, 1)),
                &pattern(),
                as_of,
            )
            .map(|s| s.status)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// More miles on the odometer never makes a task less urgent
        #[test]
        fn prop_mileage_status_is_monotonic(
            base in 0u32..100_000,
            interval in 1_000u32..30_000,
            current in 0u32..150_000,
            extra in 0u32..20_000,
        ) {
            let before = mileage_status(current, base, interval);
            let after = mileage_status(current + extra, base, interval);
            prop_assert!(after >= before);
        }

        /// A later evaluation date never makes a task less urgent
        #[test]
        fn prop_time_status_is_monotonic(
            months in 1u32..36,
            offset in 0u64..1_500,
            extra in 0u64..400,
        ) {
            let as_of = date(2024, 1, 1).checked_add_days(Days::new(offset)).unwrap();
            let later = as_of.checked_add_days(Days::new(extra)).unwrap();
            prop_assert!(time_status(months, later) >= time_status(months, as_of));
        }

        /// A dual task is exactly as urgent as its more urgent axis
        #[test]
        fn prop_dual_is_whichever_comes_first(
            base in 0u32..100_000,
            interval in 1_000u32..30_000,
            driven in 0u32..40_000,
            months in 1u32..24,
            days_since in 0u64..900,
        ) {
            let calc = DueCalculator::default();
            let v = vehicle(base + driven);
            let b = baseline(base, date(2023, 1, 1));
            let as_of = date(2023, 1, 1).checked_add_days(Days::new(days_since)).unwrap();

            let status_of = |t: ProgramTask| {
                calc.compute_due_status(&t, &v, &b, &pattern(), as_of).map(|s| s.status)
            };
            let dual = status_of(task(IntervalType::Dual, Some(interval), Some(months)));
            let miles = status_of(task(IntervalType::Mileage, Some(interval), None));
            let time = status_of(task(IntervalType::Time, None, Some(months)));

            prop_assert_eq!(dual, miles.max(time));
        }

        /// Overdue by exactly a tenth of the interval is high; one mile more is critical
        #[test]
        fn prop_critical_mileage_boundary(tenths in 100u32..3_000) {
            let interval = tenths * 10;
            let calc = DueCalculator::default();
            let t = task(IntervalType::Mileage, Some(interval), None);
            let b = baseline(10_000, date(2024, 1, 1));
            let due = 10_000 + interval;

            let at = calc
                .compute_due_status(&t, &vehicle(due + tenths), &b, &pattern(), date(2024, 6, 1))
                .unwrap();
            let past = calc
                .compute_due_status(&t, &vehicle(due + tenths + 1), &b, &pattern(), date(2024, 6, 1))
                .unwrap();

            prop_assert_eq!(at.priority, ReminderPriority::High);
            prop_assert_eq!(past.priority, ReminderPriority::Critical);
        }
    }
}
