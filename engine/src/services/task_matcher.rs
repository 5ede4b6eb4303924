//! Associates maintenance history with program tasks
//!
//! Logs carry no reliable link to the task that produced them, so the default
//! strategy is a keyword heuristic over free text. Matching is behind the
//! [`TaskMatcher`] trait so an explicit link can replace it.

use shared::{MaintenanceLog, ProgramTask};

/// Decides whether a log entry records a completion of a task
pub trait TaskMatcher: Send + Sync {
    fn matches(&self, task: &ProgramTask, log: &MaintenanceLog) -> bool;
}

/// Keyword groups; a task and a log match when both mention the same group
const DEFAULT_KEYWORD_GROUPS: &[&[&str]] = &[&["oil"], &["brake"], &["tire", "wheel"], &["filter"]];

/// Matches when the task name and the log title share a maintenance keyword
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    groups: Vec<Vec<String>>,
    match_services: bool,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self {
            groups: DEFAULT_KEYWORD_GROUPS
                .iter()
                .map(|g| g.iter().map(|k| k.to_string()).collect())
                .collect(),
            match_services: false,
        }
    }
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also consult the names of the services performed, not only the title
    pub fn with_services(mut self, enabled: bool) -> Self {
        self.match_services = enabled;
        self
    }

    /// Add a keyword group (e.g. `["coolant", "antifreeze"]`)
    pub fn with_group<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group: Vec<String> = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
        if !group.is_empty() {
            self.groups.push(group);
        }
        self
    }

    fn mentions(group: &[String], text: &str) -> bool {
        group.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    fn text_matches(&self, task_name: &str, text: &str) -> bool {
        let text = text.to_lowercase();
        self.groups
            .iter()
            .any(|g| Self::mentions(g, task_name) && Self::mentions(g, &text))
    }
}

impl TaskMatcher for KeywordMatcher {
    fn matches(&self, task: &ProgramTask, log: &MaintenanceLog) -> bool {
        let task_name = task.name.to_lowercase();
        if self.text_matches(&task_name, &log.title) {
            return true;
        }
        self.match_services
            && log
                .services
                .iter()
                .any(|service| self.text_matches(&task_name, service))
    }
}

/// Matches on the task ids a log explicitly records, falling back to another
/// matcher for logs that record none
pub struct LinkedTaskMatcher {
    fallback: Box<dyn TaskMatcher>,
}

impl Default for LinkedTaskMatcher {
    fn default() -> Self {
        Self::with_fallback(KeywordMatcher::default())
    }
}

impl LinkedTaskMatcher {
    pub fn with_fallback(fallback: impl TaskMatcher + 'static) -> Self {
        Self {
            fallback: Box::new(fallback),
        }
    }
}

impl TaskMatcher for LinkedTaskMatcher {
    fn matches(&self, task: &ProgramTask, log: &MaintenanceLog) -> bool {
        if log.program_task_ids.is_empty() {
            return self.fallback.matches(task, log);
        }
        log.program_task_ids.iter().any(|id| *id == task.id)
    }
}

/// Most recent service of `task` on `vehicle_id`.
///
/// `history` may hold logs for any vehicle; it is filtered here. Logs are
/// ordered newest first with a stable sort, so same-day entries keep their
/// input order.
pub fn find_last_service<'a>(
    matcher: &dyn TaskMatcher,
    vehicle_id: &str,
    task: &ProgramTask,
    history: &'a [MaintenanceLog],
) -> Option<&'a MaintenanceLog> {
    let mut candidates: Vec<&MaintenanceLog> = history
        .iter()
        .filter(|log| log.vehicle_id == vehicle_id)
        .collect();
    candidates.sort_by(|a, b| b.date.cmp(&a.date));

    candidates.into_iter().find(|log| matcher.matches(task, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::IntervalType;

    fn task(name: &str) -> ProgramTask {
        ProgramTask {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: None,
            category: "General".to_string(),
            interval_type: IntervalType::Mileage,
            interval_value: Some(5000),
            time_interval_value: None,
            time_interval_unit: None,
            reminder_offset: None,
            is_active: true,
        }
    }

    fn log(id: &str, vehicle_id: &str, day: u32, title: &str) -> MaintenanceLog {
        MaintenanceLog {
            id: id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            mileage: 40_000 + day * 100,
            title: title.to_string(),
            services: vec![],
            cost: None,
            notes: None,
            program_task_ids: vec![],
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches(&task("Oil Change"), &log("l", "v", 1, "OIL and filter")));
        assert!(matcher.matches(&task("Brake Inspection"), &log("l", "v", 1, "Front brakes")));
        assert!(!matcher.matches(&task("Oil Change"), &log("l", "v", 1, "Car wash")));
    }

    #[test]
    fn test_tire_and_wheel_are_one_group() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.matches(&task("Tire Rotation"), &log("l", "v", 1, "Wheel alignment")));
    }

    #[test]
    fn test_unknown_words_never_match() {
        let matcher = KeywordMatcher::default();
        assert!(!matcher.matches(&task("Coolant Flush"), &log("l", "v", 1, "Coolant flush")));

        let extended = KeywordMatcher::default().with_group(["coolant", "antifreeze"]);
        assert!(extended.matches(&task("Coolant Flush"), &log("l", "v", 1, "Antifreeze top-up")));
    }

    #[test]
    fn test_services_only_consulted_when_enabled() {
        let mut entry = log("l", "v", 1, "Dealer visit");
        entry.services = vec!["Oil change".to_string()];

        assert!(!KeywordMatcher::default().matches(&task("Oil Change"), &entry));
        assert!(KeywordMatcher::default()
            .with_services(true)
            .matches(&task("Oil Change"), &entry));
    }

    #[test]
    fn test_linked_matcher_prefers_explicit_links() {
        let matcher = LinkedTaskMatcher::default();
        let oil = task("Oil Change");

        let mut linked = log("l1", "v", 1, "Oil change");
        linked.program_task_ids = vec!["something-else".to_string()];
        assert!(!matcher.matches(&oil, &linked));

        linked.program_task_ids.push(oil.id.clone());
        assert!(matcher.matches(&oil, &linked));

        // No links recorded: keyword fallback
        assert!(matcher.matches(&oil, &log("l2", "v", 1, "oil")));
    }

    #[test]
    fn test_find_last_service_returns_most_recent_match() {
        let history = vec![
            log("old", "v", 1, "Oil change"),
            log("recent", "v", 20, "Oil change"),
            log("other-task", "v", 25, "Brake pads"),
            log("other-vehicle", "w", 28, "Oil change"),
        ];
        let found = find_last_service(&KeywordMatcher::default(), "v", &task("Oil Change"), &history);
        assert_eq!(found.map(|l| l.id.as_str()), Some("recent"));
    }

    #[test]
    fn test_find_last_service_ties_keep_input_order() {
        let history = vec![log("first", "v", 5, "Oil"), log("second", "v", 5, "Oil")];
        let found = find_last_service(&KeywordMatcher::default(), "v", &task("Oil Change"), &history);
        assert_eq!(found.map(|l| l.id.as_str()), Some("first"));
    }

    #[test]
    fn test_find_last_service_none() {
        let matcher = KeywordMatcher::default();
        assert!(find_last_service(&matcher, "v", &task("Oil Change"), &[]).is_none());

        let history = vec![log("l", "v", 1, "Wiper blades")];
        assert!(find_last_service(&matcher, "v", &task("Oil Change"), &history).is_none());
    }
}
