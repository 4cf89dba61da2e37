//! The task board: all application state and the operations on it.
//!
//! `TaskBoard` owns the task collection, the form, the active filter, the
//! search text and the edit target. Every operation that changes the
//! collection writes it back through the injected `TaskRepository`. The
//! form state is the TUI's `TaskForm`, but the board does no drawing and
//! reads no terminal events; the TUI and the CLI both drive it by filling
//! the form and calling `submit`.

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{debug, error};

use crate::dates::{now_time, parse_due_input};
use crate::error::StorageError;
use crate::fields::Filter;
use crate::filter::filter_tasks;
use crate::storage::{Storage, TaskRepository};
use crate::task::Task;
use crate::tui::task_form::TaskForm;

/// Why a submit was refused. The collection and form are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyName,
    InvalidDueDate(String),
    /// The id counter cannot advance any further.
    IdsExhausted,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::EmptyName => write!(f, "Task name is required"),
            Rejection::InvalidDueDate(s) => write!(f, "Unrecognised due date '{}'", s),
            Rejection::IdsExhausted => write!(f, "No task ids left"),
        }
    }
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(String),
    Updated(String),
    /// Edit mode was left but the target no longer exists.
    Vanished(String),
    Rejected(Rejection),
}

pub struct TaskBoard<S: Storage> {
    repo: TaskRepository<S>,
    tasks: Vec<Task>,
    next_id: u64,
    form: TaskForm,
    filter: Filter,
    search: String,
    editing: Option<String>,
}

impl<S: Storage> TaskBoard<S> {
    /// Initialize the board from the repository.
    ///
    /// A missing or unreadable collection gives an empty board.
    pub fn load(repo: TaskRepository<S>) -> Self {
        let snapshot = repo.load_or_default();
        TaskBoard {
            repo,
            tasks: snapshot.tasks,
            next_id: snapshot.next_id,
            form: TaskForm::new(),
            filter: Filter::All,
            search: String::new(),
            editing: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn edit_target(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Tasks passing the active filter and search, in collection order.
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, self.filter, &self.search)
    }

    /// Submit the form using the current local clock.
    pub fn submit_now(&mut self) -> Result<Submitted, StorageError> {
        self.submit(now_time(), Local::now().date_naive())
    }

    /// Add a task, or update the edit target, from the form.
    ///
    /// `now` stamps the task; `today` anchors relative due dates.
    pub fn submit(&mut self, now: NaiveTime, today: NaiveDate) -> Result<Submitted, StorageError> {
        let name = self.form.name.value.trim().to_string();
        if name.is_empty() {
            return Ok(Submitted::Rejected(Rejection::EmptyName));
        }
        let due_raw = self.form.due_date.value.trim();
        let due_date = if due_raw.is_empty() {
            None
        } else {
            match parse_due_input(due_raw, today) {
                Some(d) => Some(d),
                None => {
                    return Ok(Submitted::Rejected(Rejection::InvalidDueDate(due_raw.to_string())))
                }
            }
        };
        let priority = self.form.priority;
        let category = self.form.category;

        let outcome = match self.editing.take() {
            Some(id) => match self.tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.name = name;
                    task.time = now;
                    task.priority = priority;
                    task.due_date = due_date;
                    task.category = category;
                    debug!(id = %id, "updated task");
                    Submitted::Updated(id)
                }
                None => {
                    debug!(id = %id, "edit target vanished");
                    Submitted::Vanished(id)
                }
            },
            None => {
                let Some(following) = self.next_id.checked_add(1) else {
                    return Ok(Submitted::Rejected(Rejection::IdsExhausted));
                };
                let id = self.next_id.to_string();
                self.next_id = following;
                self.tasks.push(Task {
                    id: id.clone(),
                    name,
                    time: now,
                    due_date,
                    priority,
                    completed: false,
                    category,
                });
                debug!(id = %id, "added task");
                Submitted::Added(id)
            }
        };

        self.form.reset();
        if !matches!(outcome, Submitted::Vanished(_)) {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Remove the task with `id`. Returns false when there is no such task.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        debug!(id, "deleted task");
        self.persist()?;
        Ok(true)
    }

    /// Load the task with `id` into the form and enter edit mode.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(task) = self.get(id) else {
            return false;
        };
        let form = TaskForm::from_task(task);
        self.form = form;
        self.editing = Some(id.to_string());
        true
    }

    /// Leave edit mode and clear the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.reset();
    }

    /// Flip the completion flag of the task with `id`.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        debug!(id, completed = task.completed, "toggled task");
        self.persist()?;
        Ok(true)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.repo.save(&self.tasks, self.next_id).inspect_err(|e| {
            error!(error = %e, "failed to save tasks");
        })
    }
}
