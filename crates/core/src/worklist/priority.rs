use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::task::Priority;

/// Due dates within this many days of today classify as medium priority.
/// Tunable via `worklist.due_soon_window_days`.
pub const DEFAULT_DUE_SOON_WINDOW_DAYS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    pub due_soon_window_days: i64,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self { due_soon_window_days: DEFAULT_DUE_SOON_WINDOW_DAYS }
    }
}

/// Pure, total classification. Overdue is always high, regardless of task
/// kind; a due date inside the near-term window is medium.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityClassifier {
    config: PriorityConfig,
}

impl PriorityClassifier {
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, due_date: NaiveDate, today: NaiveDate) -> Priority {
        if due_date < today {
            return Priority::High;
        }
        let days_out = (due_date - today).num_days();
        if days_out <= self.config.due_soon_window_days.max(0) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::{PriorityClassifier, PriorityConfig};
    use crate::domain::task::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date")
    }

    #[test]
    fn overdue_is_always_high() {
        let classifier = PriorityClassifier::default();
        for days_ago in 1..30 {
            let due = today() - Duration::days(days_ago);
            assert_eq!(classifier.classify(due, today()), Priority::High, "{days_ago} days ago");
        }
    }

    #[test]
    fn due_today_and_within_window_is_medium() {
        let classifier = PriorityClassifier::default();
        assert_eq!(classifier.classify(today(), today()), Priority::Medium);
        assert_eq!(classifier.classify(today() + Duration::days(3), today()), Priority::Medium);
    }

    #[test]
    fn beyond_window_is_low() {
        let classifier = PriorityClassifier::default();
        assert_eq!(classifier.classify(today() + Duration::days(4), today()), Priority::Low);
        assert_eq!(classifier.classify(today() + Duration::days(40), today()), Priority::Low);
    }

    #[test]
    fn window_is_tunable() {
        let classifier = PriorityClassifier::new(PriorityConfig { due_soon_window_days: 7 });
        assert_eq!(classifier.classify(today() + Duration::days(7), today()), Priority::Medium);
        assert_eq!(classifier.classify(today() + Duration::days(8), today()), Priority::Low);
    }

    #[test]
    fn negative_window_still_classifies_totally() {
        let classifier = PriorityClassifier::new(PriorityConfig { due_soon_window_days: -5 });
        assert_eq!(classifier.classify(today(), today()), Priority::Medium);
        assert_eq!(classifier.classify(today() + Duration::days(1), today()), Priority::Low);
    }
}
