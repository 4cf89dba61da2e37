//! Display helpers shared by the CLI and the TUI.

use crate::dates::{format_due, format_time};
use crate::fields::{Category, Filter, Priority};
use crate::task::Task;

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Format a category for display.
pub fn format_category(c: Category) -> &'static str {
    match c {
        Category::General => "General",
        Category::Work => "Work",
        Category::Personal => "Personal",
        Category::School => "School",
    }
}

pub fn format_filter(f: Filter) -> &'static str {
    match f {
        Filter::All => "All",
        Filter::Completed => "Completed",
        Filter::Pending => "Pending",
    }
}

/// Headline of a task as shown in lists: "name - Priority".
pub fn format_headline(task: &Task) -> String {
    format!("{} - {}", task.name, format_priority(task.priority))
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Render tasks as a plain-text table.
pub fn render_table(tasks: &[&Task]) -> String {
    let mut out = format!(
        "{:<5} {:<4} {:<10} {:<9} {:<10} {:<8} {}\n",
        "ID", "Done", "Due", "Category", "Time", "Priority", "Name"
    );
    for t in tasks {
        out.push_str(&format!(
            "{:<5} {:<4} {:<10} {:<9} {:<10} {:<8} {}\n",
            truncate(&t.id, 5),
            if t.completed { "x" } else { "" },
            format_due(t.due_date),
            format_category(t.category),
            format_time(t.time),
            format_priority(t.priority),
            t.name
        ));
    }
    out
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    print!("{}", render_table(tasks));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long name", 6), "a lon…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_render_table_lists_fields() {
        let task = Task {
            id: "1".into(),
            name: "Buy milk".into(),
            time: NaiveTime::from_hms_opt(14, 3, 0).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            priority: Priority::Medium,
            completed: false,
            category: Category::Work,
        };
        assert_eq!(format_headline(&task), "Buy milk - Medium");
        let table = render_table(&[&task]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with("1 "));
        assert!(row.contains("2024-05-01"));
        assert!(row.contains("Work"));
        assert!(row.contains("14:03:00"));
        assert!(row.ends_with("Medium   Buy milk"));
    }
}
