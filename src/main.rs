//! # taskboard
//!
//! A keyboard-driven task list for the terminal.
//!
//! Tasks carry a name, a priority (Low, Medium, High), a category (General,
//! Work, Personal, School), an optional due date and the time they were last
//! written. The board filters by completion state (All, Completed, Pending)
//! and searches names case-insensitively.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! taskboard
//!
//! # Add a task from the shell
//! taskboard add "Buy milk" --priority medium --category work --due 2024-05-01
//!
//! # List pending tasks matching "milk"
//! taskboard list --filter pending --search milk
//! ```
//!
//! Data lives in `~/.taskboard/storage.json` (override with `TASKBOARD_HOME`,
//! `--data-dir` or `--store`). Logs go to `taskboard.log` next to it; set
//! `TASKBOARD_LOG=debug` for more detail.

use std::process::ExitCode;

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod filter;
pub mod format;
pub mod logging;
pub mod storage;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod header;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;
use logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    let config = match Config::resolve(cli.store.as_deref(), cli.data_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging in {}: {}", config.data_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match run_command(&config, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
