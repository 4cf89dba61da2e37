//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which routes key input to the
//! `TaskBoard`, tracks the list selection and status bar, and renders the
//! header, form, search box, filter tabs and task table.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::warn;

use crate::{
    board::{Submitted, TaskBoard},
    dates::{format_due, format_time},
    fields::{Filter, Priority},
    format::{format_category, format_filter, format_priority},
    storage::Storage,
    task::Task,
    tui::{
        colors::{GOLD, PRIORITY_GREEN, PRIORITY_RED, PRIORITY_YELLOW},
        enums::AppState,
        header::{Header, HEADER_HEIGHT},
        input::InputField,
        task_form::{CATEGORY_FIELD, DUE_FIELD, NAME_FIELD, PRIORITY_FIELD},
        utils::centered_rect,
    },
};

/// Color used for a priority label.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => PRIORITY_RED,
        Priority::Medium => PRIORITY_YELLOW,
        Priority::Low => PRIORITY_GREEN,
    }
}

/// Main application state for the terminal user interface.
pub struct App<S: Storage> {
    board: TaskBoard<S>,
    state: AppState,
    list_state: TableState,
    status_message: String,
}

impl<S: Storage> App<S> {
    pub fn new(board: TaskBoard<S>) -> Self {
        let mut app = App {
            board,
            state: AppState::TaskList,
            list_state: TableState::default(),
            status_message: String::new(),
        };
        app.sync_selection();
        app
    }

    pub fn board(&self) -> &TaskBoard<S> {
        &self.board
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Id of the highlighted task in the visible list.
    pub fn selected_id(&self) -> Option<String> {
        let idx = self.list_state.selected()?;
        self.board.visible().get(idx).map(|t| t.id.clone())
    }

    /// Keep the selection inside the visible list.
    fn sync_selection(&mut self) {
        let len = self.board.visible().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.board.visible().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();
        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key.code),
            AppState::Form => self.handle_form_input(key.code),
            AppState::Search => self.handle_search_input(key.code),
            AppState::Help => self.handle_help_input(key.code),
        }
        false
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Char('c') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Tab => {
                self.state = AppState::Form;
            }
            KeyCode::Char('/') => {
                self.state = AppState::Search;
            }
            KeyCode::Char('f') => self.set_filter(self.board.filter().next()),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Completed),
            KeyCode::Char('3') => self.set_filter(Filter::Pending),
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.state = AppState::Help;
            }
            KeyCode::Esc if self.board.is_editing() => {
                self.board.cancel_edit();
                self.set_status_message("Edit cancelled");
            }
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                if self.board.is_editing() {
                    self.board.cancel_edit();
                    self.set_status_message("Edit cancelled");
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.board.form_mut().next_field(),
            KeyCode::BackTab | KeyCode::Up => self.board.form_mut().prev_field(),
            KeyCode::Left => self.board.form_mut().handle_left_right(false),
            KeyCode::Right => self.board.form_mut().handle_left_right(true),
            KeyCode::Backspace => self.board.form_mut().handle_backspace(),
            KeyCode::Delete => self.board.form_mut().handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.board.form_mut().handle_char(c),
            _ => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.board.search_mut().clear();
                self.state = AppState::TaskList;
            }
            KeyCode::Enter | KeyCode::Tab => {
                self.state = AppState::TaskList;
                if !self.board.search().is_empty() {
                    let msg = format!(
                        "Search applied: '{}' ({} tasks)",
                        self.board.search(),
                        self.board.visible().len()
                    );
                    self.set_status_message(msg);
                }
            }
            KeyCode::Backspace => {
                self.board.search_mut().pop();
            }
            KeyCode::Char(c) => self.board.search_mut().push(c),
            _ => {}
        }
        self.sync_selection();
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
            self.state = AppState::TaskList;
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        self.board.set_filter(filter);
        self.sync_selection();
        self.set_status_message(format!("Showing {} tasks", format_filter(filter)));
    }

    fn submit_form(&mut self) {
        match self.board.submit_now() {
            Ok(Submitted::Added(id)) => {
                self.set_status_message(format!("Task {} added", id));
            }
            Ok(Submitted::Updated(id)) => {
                self.state = AppState::TaskList;
                self.set_status_message(format!("Task {} updated", id));
            }
            Ok(Submitted::Vanished(id)) => {
                self.state = AppState::TaskList;
                self.set_status_message(format!("Task {} no longer exists", id));
            }
            Ok(Submitted::Rejected(reason)) => self.set_status_message(reason.to_string()),
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
        self.sync_selection();
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.board.toggle(&id) {
            self.set_status_message(format!("Error: {}", e));
        }
        self.sync_selection();
    }

    fn edit_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No task selected");
            return;
        };
        if self.board.begin_edit(&id) {
            self.state = AppState::Form;
            self.set_status_message(format!("Editing task {}", id));
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.board.delete(&id) {
            Ok(_) => self.set_status_message(format!("Task {} deleted", id)),
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
        self.sync_selection();
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(false)
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let form = self.board.form();
        let editing = self.board.is_editing();
        let focused = self.state == AppState::Form;

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(10),
            ])
            .split(area);

        let border = |field: usize| {
            if focused && form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };
        let name_title = match self.board.edit_target() {
            Some(id) => format!("Edit task {}", id),
            None => "New task".to_string(),
        };

        let text_field = |input: &InputField, title: String, field: usize| {
            Paragraph::new(input.value.clone()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border(field)),
            )
        };
        f.render_widget(text_field(&form.name, name_title, NAME_FIELD), chunks[0]);
        f.render_widget(
            text_field(&form.due_date, "Due date".to_string(), DUE_FIELD),
            chunks[1],
        );

        let selector = |label: &'static str, color: Color, title: &'static str, field: usize| {
            Paragraph::new(Line::from(vec![
                Span::raw("< "),
                Span::styled(label, Style::default().fg(color)),
                Span::raw(" >"),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border(field)),
            )
        };
        f.render_widget(
            selector(
                format_priority(form.priority),
                priority_color(form.priority),
                "Priority",
                PRIORITY_FIELD,
            ),
            chunks[2],
        );
        f.render_widget(
            selector(format_category(form.category), Color::White, "Category", CATEGORY_FIELD),
            chunks[3],
        );

        let button = Paragraph::new(if editing { "Update" } else { "Add" })
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, chunks[4]);

        if focused {
            let (input, chunk) = match form.current_field {
                NAME_FIELD => (&form.name, chunks[0]),
                DUE_FIELD => (&form.due_date, chunks[1]),
                _ => return,
            };
            let x = chunk.x + 1 + input.cursor as u16;
            f.set_cursor_position((x.min(chunk.right().saturating_sub(2)), chunk.y + 1));
        }
    }

    fn render_search_and_filters(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(34)])
            .split(area);

        let searching = self.state == AppState::Search;
        let search_text = if self.board.search().is_empty() && !searching {
            Span::styled("Search tasks...", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.board.search().to_string())
        };
        let search = Paragraph::new(Line::from(search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(if searching { Style::default().fg(GOLD) } else { Style::default() }),
        );
        f.render_widget(search, chunks[0]);
        if searching {
            let x = chunks[0].x + 1 + self.board.search().chars().count() as u16;
            f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
        }

        let tabs = Tabs::new(Filter::ALL.iter().map(|&flt| format_filter(flt)))
            .select(self.board.filter().index())
            .highlight_style(Style::default().fg(Color::Black).bg(GOLD))
            .block(Block::default().borders(Borders::ALL).title("Filter"));
        f.render_widget(tabs, chunks[1]);
    }

    fn task_row(task: &Task) -> Row<'_> {
        let style = if task.completed {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(Color::White)
        };
        let headline = Line::from(vec![
            Span::raw(task.name.as_str()),
            Span::raw(" - "),
            Span::styled(
                format_priority(task.priority),
                Style::default().fg(priority_color(task.priority)).add_modifier(Modifier::BOLD),
            ),
        ]);
        Row::new(vec![
            Cell::from(task.id.as_str()),
            Cell::from(headline),
            Cell::from(format_due(task.due_date)),
            Cell::from(format_time(task.time)),
            Cell::from(format_category(task.category)),
            Cell::from(if task.completed { "Done" } else { "Pending" }),
        ])
        .style(style)
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let visible = self.board.visible();
        let title = format!(
            "Tasks ({}/{}) - Press 'h' for help",
            visible.len(),
            self.board.tasks().len()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if visible.is_empty() {
            let empty = Paragraph::new("No tasks found.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let header = Row::new(["ID", "Task", "Due", "Time", "Category", "Status"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(Color::Blue).fg(Color::White));

        let rows: Vec<Row> = visible.iter().map(|t| Self::task_row(t)).collect();
        let widths = [
            Constraint::Length(5),
            Constraint::Min(24),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(Span::styled("Task list", bold)),
            Line::from("  j/k, Up/Down   move selection"),
            Line::from("  c, Space       complete / undo"),
            Line::from("  e              edit selected task"),
            Line::from("  d, Delete      delete selected task"),
            Line::from("  a, n, Tab      go to the form"),
            Line::from("  /              search"),
            Line::from("  f, 1/2/3       filter All / Completed / Pending"),
            Line::from("  Esc            cancel edit"),
            Line::from("  q, Ctrl+C      quit"),
            Line::from(""),
            Line::from(Span::styled("Form", bold)),
            Line::from("  Tab/Shift+Tab  next / previous field"),
            Line::from("  Left/Right     move cursor or change selection"),
            Line::from("  Enter          add or update"),
            Line::from("  Esc            back to list (cancels edit)"),
            Line::from(""),
            Line::from("Due dates accept YYYY-MM-DD, today, tomorrow, fri, next mon, in 3d, eow, eom"),
        ];
        let help = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => {
                    let toggle = self
                        .selected_id()
                        .and_then(|id| self.board.get(&id))
                        .map_or("Complete", |t| if t.completed { "Undo" } else { "Complete" });
                    format!(
                        "c {} | e Edit | d Delete | / Search | f Filter | h Help | q Quit",
                        toggle
                    )
                }
                AppState::Form if self.board.is_editing() => {
                    "Enter to update, Esc to cancel edit".to_string()
                }
                AppState::Form => "Enter to add, Tab for next field, Esc for list".to_string(),
                AppState::Search => "Search: Esc to clear, Enter to confirm".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let accent = if self.board.is_editing() { GOLD } else { Color::Blue };
        let fg = if accent == GOLD { Color::Black } else { Color::White };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(accent).fg(fg))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        f.render_widget(Header, chunks[0]);
        self.render_form(f, chunks[1]);
        self.render_search_and_filters(f, chunks[2]);
        self.render_task_list(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);

        if self.state == AppState::Help {
            let area = f.area();
            self.render_help(f, area);
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            match self.handle_input() {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "input error");
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TaskRepository};
    use ratatui::backend::TestBackend;

    fn app() -> App<MemoryStorage> {
        App::new(TaskBoard::load(TaskRepository::new(MemoryStorage::new())))
    }

    fn press(app: &mut App<MemoryStorage>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App<MemoryStorage>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_task(app: &mut App<MemoryStorage>, name: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, name);
        press(app, KeyCode::Enter);
        press(app, KeyCode::Esc);
    }

    fn screen(app: &mut App<MemoryStorage>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_add_through_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state(), AppState::Form);
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2024-05-01");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        let tasks = app.board().tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].category, crate::fields::Category::Work);
        assert_eq!(app.status_message(), "Task 1 added");
        assert_eq!(app.state(), AppState::Form);
    }

    #[test]
    fn test_empty_submit_shows_rejection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert!(app.board().tasks().is_empty());
        assert_eq!(app.status_message(), "Task name is required");
    }

    #[test]
    fn test_list_actions_toggle_edit_delete() {
        let mut app = app();
        add_task(&mut app, "first");
        add_task(&mut app, "second");
        assert_eq!(app.state(), AppState::TaskList);
        assert_eq!(app.selected_id().as_deref(), Some("1"));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.board().get("2").unwrap().completed);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state(), AppState::Form);
        assert_eq!(app.board().edit_target(), Some("2"));
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::TaskList);
        let edited = app.board().get("2").unwrap();
        assert_eq!(edited.name, "second!");
        assert!(edited.completed);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.board().tasks().len(), 1);
        assert_eq!(app.selected_id().as_deref(), Some("1"));
    }

    #[test]
    fn test_search_and_filter_keys() {
        let mut app = app();
        add_task(&mut app, "Buy milk");
        add_task(&mut app, "Call mom");
        press(&mut app, KeyCode::Char('c'));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.board().filter(), Filter::Pending);
        assert_eq!(app.selected_id().as_deref(), Some("2"));

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "MILK");
        assert!(app.board().visible().is_empty());
        assert_eq!(app.selected_id(), None);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().search(), "");
        assert_eq!(app.board().visible().len(), 1);
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = app();
        add_task(&mut app, "first");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.board().is_editing());
        assert_eq!(app.board().form().name.value, "");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.board().form().name.value, "q");
    }

    #[test]
    fn test_render_shows_header_tasks_and_labels() {
        let mut app = app();
        let empty = screen(&mut app);
        assert!(empty.contains("Todo List"));
        assert!(empty.contains("Manage your tasks efficiently"));
        assert!(empty.contains("No tasks found."));
        assert!(empty.contains("Add"));

        add_task(&mut app, "Buy milk");
        let shown = screen(&mut app);
        assert!(shown.contains("Buy milk - Low"));
        assert!(shown.contains("Tasks (1/1)"));

        press(&mut app, KeyCode::Char('e'));
        assert!(screen(&mut app).contains("Update"));
    }
}
