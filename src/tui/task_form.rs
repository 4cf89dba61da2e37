//! Add/edit form state.
//!
//! This module provides the `TaskForm` structure holding the values of the
//! task form, the focused field, and the reset to defaults performed after
//! every successful submit.

use crate::{
    dates::format_due,
    fields::{Category, Priority},
    task::Task,
    tui::input::InputField,
};

/// Field order for keyboard navigation.
pub const NAME_FIELD: usize = 0;
pub const DUE_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
pub const CATEGORY_FIELD: usize = 3;

const FIELD_COUNT: usize = 4;

/// Task form for entering and editing fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskForm {
    pub name: InputField,
    pub due_date: InputField,
    pub priority: Priority,
    pub category: Category,
    pub current_field: usize,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// Create a form with default values: empty name and due date, Low, General.
    pub fn new() -> Self {
        let mut form = Self {
            name: InputField::new(),
            due_date: InputField::new(),
            priority: Priority::Low,
            category: Category::General,
            current_field: NAME_FIELD,
        };
        form.update_active_field();
        form
    }

    /// Create a form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.name = InputField::with_value(&task.name);
        form.due_date = InputField::with_value(&format_due(task.due_date));
        form.priority = task.priority;
        form.category = task.category;
        form.update_active_field();
        form
    }

    /// Restore every field to its default and focus the name field.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Update which text field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.name.active = self.current_field == NAME_FIELD;
        self.due_date.active = self.current_field == DUE_FIELD;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            NAME_FIELD => Some(&mut self.name),
            DUE_FIELD => Some(&mut self.due_date),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.active_input() {
            input.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.active_input() {
            input.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            PRIORITY_FIELD => {
                self.priority = if right { self.priority.next() } else { self.priority.prev() };
            }
            CATEGORY_FIELD => {
                self.category = if right { self.category.next() } else { self.category.prev() };
            }
            _ => {
                if let Some(input) = self.active_input() {
                    if right {
                        input.move_cursor_right();
                    } else {
                        input.move_cursor_left();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = TaskForm::new();
        form.name = InputField::with_value("Buy milk");
        form.due_date = InputField::with_value("2024-05-01");
        form.priority = Priority::High;
        form.category = Category::School;
        form.next_field();

        form.reset();
        assert_eq!(form, TaskForm::new());
        assert_eq!(form.name.value, "");
        assert_eq!(form.priority, Priority::Low);
        assert_eq!(form.category, Category::General);
        assert!(form.name.active);
    }

    #[test]
    fn test_from_task_prefills_fields() {
        let task = Task {
            id: "3".into(),
            name: "Essay".into(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 2),
            priority: Priority::Medium,
            completed: true,
            category: Category::School,
        };
        let form = TaskForm::from_task(&task);
        assert_eq!(form.name.value, "Essay");
        assert_eq!(form.due_date.value, "2024-06-02");
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.category, Category::School);
    }

    #[test]
    fn test_field_navigation_and_selectors() {
        let mut form = TaskForm::new();
        form.handle_char('a');
        form.prev_field();
        assert_eq!(form.current_field, CATEGORY_FIELD);
        form.handle_left_right(true);
        assert_eq!(form.category, Category::Work);
        form.prev_field();
        form.handle_left_right(false);
        assert_eq!(form.priority, Priority::High);
        form.handle_char('x');
        form.prev_field();
        assert!(form.due_date.active);
        assert!(!form.name.active);
        assert_eq!(form.name.value, "a");
        assert_eq!(form.due_date.value, "");
    }
}
