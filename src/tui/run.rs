//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::board::TaskBoard;
use crate::storage::Storage;
use crate::tui::app::App;

/// Put the terminal back into cooked mode on the main screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

/// Initialise the terminal, run the board until the user quits, restore the terminal.
pub fn run_tui<S: Storage>(board: TaskBoard<S>) -> io::Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("starting tui");
    let mut app = App::new(board);
    let result = app.run(&mut terminal);

    restore_terminal()?;
    terminal.show_cursor()?;
    info!("tui closed");

    result
}
