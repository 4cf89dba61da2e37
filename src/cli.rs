use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Keyboard-driven task board.
/// Storage defaults to ~/.taskboard/storage.json or a path passed via --store.
#[derive(Parser)]
#[command(name = "taskboard", version, about = "Add, complete, filter and search your tasks")]
pub struct Cli {
    /// Path to the JSON store file.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Directory for the store and the log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Defaults to `ui`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
