//! Derived task list: completion filter plus name search.

use crate::fields::Filter;
use crate::task::Task;

/// Select the tasks shown for `filter` and `search`, in collection order.
///
/// A task is kept when its completion state passes `filter` and its name
/// contains `search`, ignoring case. An empty search matches every name.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: Filter, search: &str) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|t| filter.admits(t.completed))
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Category, Priority};
    use chrono::NaiveTime;

    fn task(id: u64, name: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            name: name.into(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            due_date: None,
            priority: Priority::Low,
            completed,
            category: Category::General,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", false),
            task(2, "Buy BREAD", true),
            task(3, "Call mom", true),
            task(4, "Write report", false),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_completion() {
        let tasks = sample();
        assert_eq!(ids(&filter_tasks(&tasks, Filter::All, "")), ["1", "2", "3", "4"]);
        assert_eq!(ids(&filter_tasks(&tasks, Filter::Completed, "")), ["2", "3"]);
        assert_eq!(ids(&filter_tasks(&tasks, Filter::Pending, "")), ["1", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tasks = sample();
        assert_eq!(ids(&filter_tasks(&tasks, Filter::All, "buy")), ["1", "2"]);
        assert_eq!(ids(&filter_tasks(&tasks, Filter::All, "bread")), ["2"]);
        assert_eq!(ids(&filter_tasks(&tasks, Filter::Completed, "BUY")), ["2"]);
        assert!(filter_tasks(&tasks, Filter::Pending, "mom").is_empty());
    }

    #[test]
    fn test_every_filter_and_search_combination_matches_both_predicates() {
        let tasks = sample();
        for filter in Filter::ALL {
            for search in ["", "b", "BUY", "o", "report", "zzz", " "] {
                let got = ids(&filter_tasks(&tasks, filter, search));
                let expected: Vec<String> = tasks
                    .iter()
                    .filter(|t| filter.admits(t.completed))
                    .filter(|t| t.name.to_lowercase().contains(&search.to_lowercase()))
                    .map(|t| t.id.clone())
                    .collect();
                assert_eq!(got, expected, "filter {:?} search {:?}", filter, search);
            }
        }
    }

    #[test]
    fn test_filtering_leaves_collection_untouched() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = filter_tasks(&tasks, Filter::Completed, "buy");
        assert_eq!(tasks, before);
    }
}
