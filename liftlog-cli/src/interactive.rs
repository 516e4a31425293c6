//! Terminal form and log table.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::collections::BTreeSet;

use liftlog::{LogError, LogRow, Session, WorkoutForm};

use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

const TABLE_HELP: &str =
    "a: add log | space: mark | d: delete | /: search | s: show all | j/k: navigate | q: quit";
const FORM_HELP: &str =
    "Tab/Shift-Tab: move | Ctrl-N: add set | Enter: add workout log | Esc: back to table";
const SEARCH_HELP: &str = "Enter: search | Esc: cancel";

const FIXED_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Table,
    Form(usize),
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Help,
    Info,
    Warning,
    Error,
}

struct WorkoutLogApp {
    session: Session,
    form: WorkoutForm,
    rows: Vec<LogRow>,
    table_state: TableState,
    marked: BTreeSet<i32>,
    search_input: String,
    active_query: Option<String>,
    focus: Focus,
    status_kind: StatusKind,
    status_message: String,
}

impl WorkoutLogApp {
    fn new(session: Session) -> Result<Self> {
        let mut app = Self {
            session,
            form: WorkoutForm::new(),
            rows: Vec::new(),
            table_state: TableState::default(),
            marked: BTreeSet::new(),
            search_input: String::new(),
            active_query: None,
            focus: Focus::Table,
            status_kind: StatusKind::Help,
            status_message: TABLE_HELP.to_string(),
        };
        app.refresh_rows()?;
        Ok(app)
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status_kind = kind;
        self.status_message = message.into();
    }

    fn report_error(&mut self, e: LogError) {
        debug!("Operation failed: {}", e);
        if e.is_warning() {
            self.set_status(StatusKind::Warning, e.to_string());
        } else {
            self.set_status(StatusKind::Error, e.to_string());
        }
    }

    fn refresh_rows(&mut self) -> Result<(), LogError> {
        self.rows = match &self.active_query {
            Some(query) => self.session.search_rows(query)?,
            None => self.session.list_rows()?,
        };

        let visible: BTreeSet<i32> = self.rows.iter().map(|r| r.log_id).collect();
        self.marked.retain(|id| visible.contains(id));

        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(self.rows.len() - 1)));
        }
        Ok(())
    }

    fn refresh_or_report(&mut self) {
        if let Err(e) = self.refresh_rows() {
            self.report_error(e);
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            if selected + 1 < self.rows.len() {
                self.table_state.select(Some(selected + 1));
            }
        }
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            if selected > 0 {
                self.table_state.select(Some(selected - 1));
            }
        }
    }

    fn highlighted_log_id(&self) -> Option<i32> {
        self.table_state
            .selected()
            .and_then(|idx| self.rows.get(idx))
            .map(|row| row.log_id)
    }

    fn toggle_mark(&mut self) {
        if let Some(log_id) = self.highlighted_log_id() {
            if !self.marked.remove(&log_id) {
                self.marked.insert(log_id);
            }
        }
    }

    /// Marked logs, or the highlighted one when nothing is marked.
    fn selected_log_ids(&self) -> Vec<i32> {
        if self.marked.is_empty() {
            self.highlighted_log_id().into_iter().collect()
        } else {
            self.marked.iter().copied().collect()
        }
    }

    fn delete_selected(&mut self) {
        let ids = self.selected_log_ids();
        match self.session.delete_workouts(&ids) {
            Ok(_) => {
                self.marked.clear();
                self.set_status(StatusKind::Info, "Selected log(s) deleted successfully");
                self.refresh_or_report();
            }
            Err(e) => self.report_error(e),
        }
    }

    fn submit_form(&mut self) {
        match self.session.add_workout(&self.form) {
            Ok(added) => {
                debug!("Stored workout log {}", added.workout_log_id);
                self.form.clear();
                self.focus = Focus::Form(0);
                self.set_status(StatusKind::Info, "Workout log added!");
                self.refresh_or_report();
            }
            Err(e) => self.report_error(e),
        }
    }

    fn run_search(&mut self) {
        self.active_query = Some(self.search_input.clone());
        self.focus = Focus::Table;
        match self.refresh_rows() {
            Ok(()) => {
                let message =
                    format!("{} row(s) match \"{}\"", self.rows.len(), self.search_input);
                self.set_status(StatusKind::Info, message);
            }
            Err(e) => self.report_error(e),
        }
    }

    fn show_all(&mut self) {
        self.active_query = None;
        self.search_input.clear();
        self.set_status(StatusKind::Help, TABLE_HELP);
        self.refresh_or_report();
    }

    fn field_count(&self) -> usize {
        FIXED_FIELDS + self.form.set_fields.len()
    }

    fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.form.date),
            1 => Some(&mut self.form.workout_day_type),
            2 => Some(&mut self.form.exercise),
            n => self.form.set_fields.get_mut(n - FIXED_FIELDS),
        }
    }

    fn field_value(&self, idx: usize) -> &str {
        match idx {
            0 => &self.form.date,
            1 => &self.form.workout_day_type,
            2 => &self.form.exercise,
            n => self
                .form
                .set_fields
                .get(n - FIXED_FIELDS)
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    fn focus_form(&mut self, idx: usize) {
        self.focus = Focus::Form(idx);
        self.set_status(StatusKind::Help, FORM_HELP);
    }

    fn focus_table(&mut self) {
        self.focus = Focus::Table;
        self.set_status(StatusKind::Help, TABLE_HELP);
    }

    fn add_set_input(&mut self) {
        self.form.add_set_input();
        // Jump to the reps field of the new pair.
        self.focus = Focus::Form(self.field_count() - 2);
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.focus {
            Focus::Table => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return true,
                KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                KeyCode::Char(' ') => self.toggle_mark(),
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                    self.delete_selected()
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Tab => self.focus_form(0),
                KeyCode::Char('/') => {
                    self.focus = Focus::Search;
                    self.set_status(StatusKind::Help, SEARCH_HELP);
                }
                KeyCode::Char('s') | KeyCode::Char('S') => self.show_all(),
                _ => {}
            },
            Focus::Form(idx) => {
                let count = self.field_count();
                match key.code {
                    KeyCode::Esc => self.focus_table(),
                    KeyCode::Tab | KeyCode::Down => self.focus = Focus::Form((idx + 1) % count),
                    KeyCode::BackTab | KeyCode::Up => {
                        self.focus = Focus::Form((idx + count - 1) % count)
                    }
                    KeyCode::Enter => self.submit_form(),
                    KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.add_set_input()
                    }
                    KeyCode::Backspace => {
                        if let Some(field) = self.field_mut(idx) {
                            field.pop();
                        }
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        if let Some(field) = self.field_mut(idx) {
                            field.push(c);
                        }
                    }
                    _ => {}
                }
            }
            Focus::Search => match key.code {
                KeyCode::Esc => self.focus_table(),
                KeyCode::Enter => self.run_search(),
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char(c) => self.search_input.push(c),
                _ => {}
            },
        }
        false
    }
}

fn field_span(app: &WorkoutLogApp, idx: usize) -> Span<'static> {
    let focused = app.focus == Focus::Form(idx);
    let value = app.field_value(idx);
    let text = if focused {
        format!("[{}_]", value)
    } else {
        format!("[{}]", value)
    };
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(text, style)
}

fn form_lines(app: &WorkoutLogApp) -> Vec<Line<'static>> {
    let labels = [
        "Date (MM-DD-YYYY)",
        "Workout Day Type (Push, Pull, Leg)",
        "Exercise",
    ];
    let mut lines: Vec<Line> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            Line::from(vec![
                Span::raw(format!("{:<36}", label)),
                field_span(app, idx),
            ])
        })
        .collect();

    for set in 0..app.form.set_count() {
        let reps_idx = FIXED_FIELDS + set * 2;
        let mut spans = vec![
            Span::raw(format!("{:<36}", format!("Set {}", set + 1))),
            Span::raw("Reps "),
            field_span(app, reps_idx),
        ];
        if reps_idx + 1 < app.field_count() {
            spans.push(Span::raw("  Weight (lbs) "));
            spans.push(field_span(app, reps_idx + 1));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn log_table(app: &WorkoutLogApp) -> Table<'static> {
    let header = Row::new(vec![
        "ID",
        "Date",
        "Workout Day Type",
        "Exercise",
        "Set Number",
        "Reps",
        "Weight Used (lbs)",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| {
            let marked = app.marked.contains(&row.log_id);
            let id = if marked {
                format!("* {}", row.log_id)
            } else {
                format!("  {}", row.log_id)
            };
            let style = if marked {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(id),
                Cell::from(row.date.clone()),
                Cell::from(row.workout_day_type.clone()),
                Cell::from(row.exercise.clone()),
                Cell::from(row.set_number.to_string()),
                Cell::from(row.reps.to_string()),
                Cell::from(format!("{:.1}", row.weight_used)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Length(6),
        Constraint::Length(18),
    ];

    let title = match &app.active_query {
        Some(query) => format!("Workout Logs matching \"{}\" ({} rows)", query, app.rows.len()),
        None => format!("Workout Logs ({} rows)", app.rows.len()),
    };
    let border_style = if app.focus == Focus::Table {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
}

fn render(app: &mut WorkoutLogApp, frame: &mut Frame) {
    let form_height = (FIXED_FIELDS + app.form.set_count()) as u16 + 2;
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(form_height),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .split(frame.area());

    // Header
    let header = Paragraph::new("Workout Log Manager")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Entry form
    let form_border = if matches!(app.focus, Focus::Form(_)) {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let form = Paragraph::new(form_lines(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(form_border)
            .title("New Workout Log"),
    );
    frame.render_widget(form, chunks[1]);

    // Search bar
    let search_style = if app.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search_input.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Search Logs"));
    frame.render_widget(search, chunks[2]);

    // Logs table
    let table = log_table(app);
    frame.render_stateful_widget(table, chunks[3], &mut app.table_state);

    // Footer with status
    let status_style = match app.status_kind {
        StatusKind::Help => Style::default().fg(Color::White),
        StatusKind::Info => Style::default().fg(Color::Green),
        StatusKind::Warning => Style::default().fg(Color::Yellow),
        StatusKind::Error => Style::default().fg(Color::Red),
    };
    let footer = Paragraph::new(app.status_message.as_str())
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(footer, chunks[4]);
}

pub fn run(mut terminal: DefaultTerminal, session: Session) -> Result<()> {
    let mut app = WorkoutLogApp::new(session)?;

    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app() -> (TempDir, WorkoutLogApp) {
        let dir = TempDir::new().unwrap();
        let url = dir.path().join("workout_logs.db");
        let session = Session::open(url.to_str().unwrap()).unwrap();
        (dir, WorkoutLogApp::new(session).unwrap())
    }

    fn press(app: &mut WorkoutLogApp, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut WorkoutLogApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_form(app: &mut WorkoutLogApp, date: &str, day: &str, exercise: &str, sets: &[&str]) {
        app.form = WorkoutForm {
            date: date.into(),
            workout_day_type: day.into(),
            exercise: exercise.into(),
            set_fields: sets.iter().map(|s| s.to_string()).collect(),
        };
    }

    #[test]
    fn typing_in_the_form_and_submitting_adds_rows() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.focus, Focus::Form(0));

        // Replace the pre-filled date.
        app.form.date.clear();
        type_text(&mut app, "01-05-2024");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Push");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Bench Press");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "10");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "135");
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert_eq!(app.focus, Focus::Form(5));
        type_text(&mut app, "8");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "145");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.status_kind, StatusKind::Info);
        assert_eq!(app.status_message, "Workout log added!");
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.form, WorkoutForm::new());
    }

    #[test]
    fn validation_errors_keep_the_form() {
        let (_dir, mut app) = app();
        fill_form(&mut app, "2024-01-05", "Push", "Bench", &["10", "135"]);
        app.focus = Focus::Form(0);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.status_kind, StatusKind::Error);
        assert_eq!(app.status_message, "Invalid date format. Please use MM-DD-YYYY.");
        assert_eq!(app.form.date, "2024-01-05");
        assert!(app.rows.is_empty());
    }

    #[test]
    fn delete_on_empty_table_warns() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.status_kind, StatusKind::Warning);
        assert_eq!(app.status_message, "No item selected");
    }

    #[test]
    fn delete_prefers_marked_logs_over_the_highlight() {
        let (_dir, mut app) = app();
        fill_form(&mut app, "01-05-2024", "Push", "Bench", &["10", "135", "8", "145"]);
        app.submit_form();
        fill_form(&mut app, "01-06-2024", "Pull", "Row", &["10", "95"]);
        app.submit_form();
        app.focus_table();

        // Rows: [Row (01-06)], [Bench set 1], [Bench set 2]; highlight stays on the first.
        assert_eq!(app.rows.len(), 3);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        let bench_id = app.rows[1].log_id;
        assert!(app.marked.contains(&bench_id));

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.status_message, "Selected log(s) deleted successfully");
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].exercise, "Row");
        assert!(app.marked.is_empty());
    }

    #[test]
    fn search_then_show_all() {
        let (_dir, mut app) = app();
        fill_form(&mut app, "01-05-2024", "Push", "Bench", &["10", "135"]);
        app.submit_form();
        fill_form(&mut app, "01-06-2024", "Leg", "Squat", &["5", "225"]);
        app.submit_form();
        app.focus_table();

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "SQU");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Table);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].exercise, "Squat");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.rows.len(), 2);
        assert!(app.active_query.is_none());
    }

    #[test]
    fn quit_keys() {
        let (_dir, mut app) = app();
        assert!(press(&mut app, KeyCode::Char('q')));
        app.focus = Focus::Form(1);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.form.workout_day_type, "q");
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
