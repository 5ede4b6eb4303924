//! Ordering and tallying of reminder lists

use std::cmp::Ordering;

use shared::{ReminderItem, ReminderSummary};

/// Urgency order: most urgent first.
///
/// 1. Higher priority
/// 2. Higher status
/// 3. Larger overdue magnitude on the driving axis
/// 4. Earlier estimated or due date; undated items last
pub fn compare_urgency(a: &ReminderItem, b: &ReminderItem) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.status.cmp(&a.status))
        .then_with(|| {
            let a_mag = a.overdue_by.map(|o| o.magnitude()).unwrap_or(0);
            let b_mag = b.overdue_by.map(|o| o.magnitude()).unwrap_or(0);
            b_mag.cmp(&a_mag)
        })
        .then_with(|| match (a.sort_date(), b.sort_date()) {
            (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Sort by urgency (stable) and count what remains
pub fn rank_and_summarize(mut items: Vec<ReminderItem>) -> (Vec<ReminderItem>, ReminderSummary) {
    items.sort_by(compare_urgency);
    let summary = ReminderSummary::tally(&items);
    (items, summary)
}
