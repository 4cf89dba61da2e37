//! Enumerations for TUI state management.

/// Which part of the screen receives key input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    Form,
    Search,
    Help,
}
