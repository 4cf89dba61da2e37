//! Command implementations for the CLI interface.
//!
//! Every command opens the board from the configured store and goes through
//! the same `TaskBoard` operations the TUI uses.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::board::{Submitted, TaskBoard};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fields::{Category, Filter, Priority};
use crate::format::{format_category, format_headline, print_table};
use crate::storage::{FileStorage, Storage, TaskRepository};
use crate::tui::input::InputField;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board.
    Ui,

    /// Add a new task.
    Add {
        /// Task name.
        name: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "fri", "in 3d", ...
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum, default_value_t = Priority::Low)]
        priority: Priority,
        #[arg(long, value_enum, default_value_t = Category::General)]
        category: Category,
    },

    /// List tasks.
    List {
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Case-insensitive name search.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Change fields of a task. Omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        category: Option<Category>,
    },

    /// Mark a task complete, or pending again if it already is.
    Toggle { id: String },

    /// Delete a task.
    Delete { id: String },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the board stored at the configured path.
pub fn open_board(config: &Config) -> Result<TaskBoard<FileStorage>> {
    let storage = FileStorage::open(&config.store_path)?;
    info!(store = %storage.path().display(), "opened board");
    Ok(TaskBoard::load(TaskRepository::new(storage)))
}

/// Run `command`. Everything except `completions` opens the configured store.
pub fn run_command(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Ui => cmd_ui(open_board(config)?),
        Commands::Add { name, due, priority, category } => {
            let mut board = open_board(config)?;
            let id = cmd_add(&mut board, &name, due.as_deref(), priority, category)?;
            if let Some(task) = board.get(&id) {
                println!("Added task {}: {}", id, format_headline(task));
            }
            Ok(())
        }
        Commands::List { filter, search } => {
            let board = open_board(config)?;
            cmd_list(&board, filter, &search);
            Ok(())
        }
        Commands::Edit { id, name, due, clear_due, priority, category } => {
            let mut board = open_board(config)?;
            let due = if clear_due { Some(String::new()) } else { due };
            cmd_edit(&mut board, &id, name.as_deref(), due.as_deref(), priority, category)?;
            if let Some(task) = board.get(&id) {
                println!("Updated task {}: {}", id, format_headline(task));
            }
            Ok(())
        }
        Commands::Toggle { id } => {
            let mut board = open_board(config)?;
            let completed = cmd_toggle(&mut board, &id)?;
            println!("Task {} is now {}", id, if completed { "completed" } else { "pending" });
            Ok(())
        }
        Commands::Delete { id } => {
            let mut board = open_board(config)?;
            cmd_delete(&mut board, &id)?;
            println!("Deleted task {}", id);
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

pub fn cmd_ui<S: Storage>(board: TaskBoard<S>) -> Result<()> {
    run_tui(board)?;
    Ok(())
}

/// Add a task and return its id.
pub fn cmd_add<S: Storage>(
    board: &mut TaskBoard<S>,
    name: &str,
    due: Option<&str>,
    priority: Priority,
    category: Category,
) -> Result<String> {
    let form = board.form_mut();
    form.reset();
    form.name = InputField::with_value(name);
    form.due_date = InputField::with_value(due.unwrap_or(""));
    form.priority = priority;
    form.category = category;

    match board.submit_now()? {
        Submitted::Added(id) => Ok(id),
        Submitted::Rejected(reason) => Err(Error::Rejected(reason.to_string())),
        other => Err(Error::Rejected(format!("unexpected submit result {:?}", other))),
    }
}

/// Print the tasks passing `filter` and `search`. Returns how many were shown.
pub fn cmd_list<S: Storage>(board: &TaskBoard<S>, filter: Filter, search: &str) -> usize {
    let tasks = crate::filter::filter_tasks(board.tasks(), filter, search);
    if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        print_table(&tasks);
    }
    let summary: Vec<String> = category_counts(board)
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(c, n)| format!("{} {}", c, n))
        .collect();
    println!("{} of {} shown | {}", tasks.len(), board.tasks().len(), summary.join(", "));
    tasks.len()
}

/// Edit a task. `due` of `Some("")` clears the due date.
pub fn cmd_edit<S: Storage>(
    board: &mut TaskBoard<S>,
    id: &str,
    name: Option<&str>,
    due: Option<&str>,
    priority: Option<Priority>,
    category: Option<Category>,
) -> Result<()> {
    if !board.begin_edit(id) {
        return Err(Error::NotFound(id.to_string()));
    }
    let form = board.form_mut();
    if let Some(name) = name {
        form.name = InputField::with_value(name);
    }
    if let Some(due) = due {
        form.due_date = InputField::with_value(due);
    }
    if let Some(priority) = priority {
        form.priority = priority;
    }
    if let Some(category) = category {
        form.category = category;
    }

    match board.submit_now()? {
        Submitted::Updated(_) => Ok(()),
        Submitted::Rejected(reason) => {
            board.cancel_edit();
            Err(Error::Rejected(reason.to_string()))
        }
        Submitted::Vanished(id) => Err(Error::NotFound(id)),
        Submitted::Added(id) => Err(Error::Rejected(format!("task {} was added instead of edited", id))),
    }
}

/// Toggle completion. Returns the new completion state.
pub fn cmd_toggle<S: Storage>(board: &mut TaskBoard<S>, id: &str) -> Result<bool> {
    if !board.toggle(id)? {
        return Err(Error::NotFound(id.to_string()));
    }
    Ok(board.get(id).is_some_and(|t| t.completed))
}

pub fn cmd_delete<S: Storage>(board: &mut TaskBoard<S>, id: &str) -> Result<()> {
    if !board.delete(id)? {
        return Err(Error::NotFound(id.to_string()));
    }
    Ok(())
}

/// Print shell completion script for the given shell.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Task count per category, in selector order.
pub fn category_counts<S: Storage>(board: &TaskBoard<S>) -> Vec<(&'static str, usize)> {
    Category::ALL
        .iter()
        .map(|&c| (format_category(c), board.tasks().iter().filter(|t| t.category == c).count()))
        .collect()
}
