//! Enumerations and field types for tasks.
//!
//! This module defines the structured values a task carries (priority and
//! category) and the completion filter applied to the task list.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// The next priority in selector order, wrapping around.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    /// The previous priority in selector order, wrapping around.
    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }
}

/// Task category offered by the form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum Category {
    #[default]
    General,
    Work,
    Personal,
    School,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Work,
        Category::Personal,
        Category::School,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, false)
    }
}

/// Completion filter for the task list.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];

    /// Whether a task with the given completion state passes this filter.
    pub fn admits(self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => completed,
            Filter::Pending => !completed,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, true)
    }

    /// Position of this filter in the tab bar.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let idx = all.iter().position(|&v| v == current).unwrap_or(0);
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    all[next]
}
