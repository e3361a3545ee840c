//! Ratatui-based terminal UI.
//!
//! The TUI provides an input form for the ten customer attributes, scores the
//! record on demand through the shared pipeline, and shows the result in a
//! popup. Closing the popup resets every field to its documented default so
//! no prior prediction state leaks into the next one.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Terminal,
};

use crate::artifacts::ArtifactStore;
use crate::domain::{
    ChurnLabel, CustomerRecord, PredictionResult, AGE_RANGE, CREDIT_SCORE_RANGE,
    NUM_PRODUCTS_RANGE, TENURE_RANGE,
};
use crate::error::AppError;

const FIELD_COUNT: usize = 10;
const CREDIT_STEP: i64 = 10;
const BALANCE_STEP: f64 = 500.0;
const SALARY_STEP: f64 = 1000.0;

/// Start the TUI over the artifacts in `artifact_dir`.
pub fn run(artifact_dir: &Path) -> Result<(), AppError> {
    let store = crate::artifacts::shared(artifact_dir)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(store);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    store: &'static ArtifactStore,
    record: CustomerRecord,
    selected_field: usize,
    /// Input buffer while a numeric field is being typed into.
    editing: Option<String>,
    status: String,
    result: Option<PredictionResult>,
}

impl App {
    fn new(store: &'static ArtifactStore) -> Self {
        Self {
            store,
            record: CustomerRecord::default_for(store),
            selected_field: 0,
            editing: None,
            status: "Ready. Press p to predict.".to_string(),
            result: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.result.is_some() {
            return self.handle_popup(code);
        }
        if self.editing.is_some() {
            return self.handle_edit(code);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => match self.selected_field {
                // Categorical/boolean fields cycle on Enter as well.
                0 | 1 | 8 | 9 => self.adjust_field(1),
                _ => {
                    self.editing = Some(String::new());
                    self.status =
                        "Editing value. Enter to apply, Esc to cancel.".to_string();
                }
            },
            KeyCode::Char('p') => self.predict()?,
            _ => {}
        }

        Ok(false)
    }

    fn handle_popup(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => {
                // Closing the result resets every input to its default.
                self.result = None;
                self.record = CustomerRecord::default_for(self.store);
                self.selected_field = 0;
                self.status = "Inputs reset to defaults.".to_string();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        let Some(buffer) = self.editing.as_mut() else {
            return Ok(false);
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let input = buffer.trim().to_string();
                self.editing = None;
                self.apply_edit(&input);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Apply a typed value to the selected numeric field, clamped to the
    /// field's documented range (the form surface constrains inputs, like
    /// the sliders it replaces).
    fn apply_edit(&mut self, input: &str) {
        if input.is_empty() {
            self.status = "Empty input ignored.".to_string();
            return;
        }
        match self.selected_field {
            2 => self.apply_int_edit(input, "age"),
            3 => self.apply_int_edit(input, "tenure"),
            4 => self.apply_int_edit(input, "number of products"),
            5 => self.apply_int_edit(input, "credit score"),
            6 => self.apply_float_edit(input, "balance"),
            7 => self.apply_float_edit(input, "estimated salary"),
            _ => {}
        }
    }

    fn apply_int_edit(&mut self, input: &str, name: &str) {
        let value: i64 = match input.parse() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("Invalid {name} '{input}'.");
                return;
            }
        };
        let (lo, hi) = match self.selected_field {
            2 => AGE_RANGE,
            3 => TENURE_RANGE,
            4 => NUM_PRODUCTS_RANGE,
            _ => CREDIT_SCORE_RANGE,
        };
        let clamped = value.clamp(lo, hi);
        match self.selected_field {
            2 => self.record.age = clamped,
            3 => self.record.tenure = clamped,
            4 => self.record.num_products = clamped,
            _ => self.record.credit_score = clamped,
        }
        if clamped != value {
            self.status = format!("{name} clamped to [{lo}, {hi}]: {clamped}");
        } else {
            self.status = format!("{name}: {clamped}");
        }
    }

    fn apply_float_edit(&mut self, input: &str, name: &str) {
        let value: f64 = match input.parse() {
            Ok(v) if v >= 0.0 && f64::is_finite(v) => v,
            _ => {
                self.status = format!("Invalid {name} '{input}'.");
                return;
            }
        };
        match self.selected_field {
            6 => self.record.balance = value,
            _ => self.record.salary = value,
        }
        self.status = format!("{name}: {value:.2}");
    }

    fn adjust_field(&mut self, delta: i64) {
        match self.selected_field {
            0 => {
                self.record.geography =
                    cycle(self.store.geography_categories(), &self.record.geography, delta);
                self.status = format!("geography: {}", self.record.geography);
            }
            1 => {
                self.record.gender = cycle(self.store.gender_classes(), &self.record.gender, delta);
                self.status = format!("gender: {}", self.record.gender);
            }
            2 => {
                self.record.age = step_in_range(self.record.age, delta, AGE_RANGE);
                self.status = format!("age: {}", self.record.age);
            }
            3 => {
                self.record.tenure = step_in_range(self.record.tenure, delta, TENURE_RANGE);
                self.status = format!("tenure: {}", self.record.tenure);
            }
            4 => {
                self.record.num_products =
                    step_in_range(self.record.num_products, delta, NUM_PRODUCTS_RANGE);
                self.status = format!("products: {}", self.record.num_products);
            }
            5 => {
                self.record.credit_score = step_in_range(
                    self.record.credit_score,
                    delta * CREDIT_STEP,
                    CREDIT_SCORE_RANGE,
                );
                self.status = format!("credit score: {}", self.record.credit_score);
            }
            6 => {
                self.record.balance =
                    (self.record.balance + delta as f64 * BALANCE_STEP).max(0.0);
                self.status = format!("balance: {:.2}", self.record.balance);
            }
            7 => {
                self.record.salary = (self.record.salary + delta as f64 * SALARY_STEP).max(0.0);
                self.status = format!("salary: {:.2}", self.record.salary);
            }
            8 => {
                self.record.has_card = !self.record.has_card;
                self.status = format!("credit card: {}", yes_no(self.record.has_card));
            }
            9 => {
                self.record.active_member = !self.record.active_member;
                self.status = format!("active member: {}", yes_no(self.record.active_member));
            }
            _ => {}
        }
    }

    fn predict(&mut self) -> Result<(), AppError> {
        match crate::app::pipeline::run_predict(self.store, self.record.clone()) {
            Ok(run) => {
                self.status = crate::report::short_verdict(&run.result);
                self.result = Some(run.result);
            }
            Err(err) if err.exit_code() == 3 => {
                // Input errors stay in the form; only internal errors abort.
                self.status = format!("Input error: {err}");
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Some(result) = self.result {
            self.draw_result_popup(frame, size, &result);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("churn", Style::default().fg(Color::Cyan)),
                Span::raw(" — customer churn screening"),
            ]),
            Line::from(Span::styled(
                format!(
                    "geographies: {} | genders: {} | features: {}",
                    self.store.geography_categories().join("/"),
                    self.store.gender_classes().join("/"),
                    self.store.feature_columns().len(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let r = &self.record;
        let items = vec![
            ListItem::new(format!("Geography: {}", r.geography)),
            ListItem::new(format!("Gender: {}", r.gender)),
            ListItem::new(format!("Age: {}", r.age)),
            ListItem::new(format!("Tenure: {}y", r.tenure)),
            ListItem::new(format!("Number of products: {}", r.num_products)),
            ListItem::new(format!("Credit score: {}", r.credit_score)),
            ListItem::new(format!("Balance: {:.2}", r.balance)),
            ListItem::new(format!("Estimated salary: {:.2}", r.salary)),
            ListItem::new(format!("Has credit card: {}", yes_no(r.has_card))),
            ListItem::new(format!("Active member: {}", yes_no(r.active_member))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Customer Details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if let Some(buffer) = &self.editing {
            let hint = Paragraph::new(format!("New value: {buffer}_"))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit/toggle  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_result_popup(
        &self,
        frame: &mut ratatui::Frame<'_>,
        size: Rect,
        result: &PredictionResult,
    ) {
        let popup = centered_rect(size, 50, 9);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title("Prediction Result")
            .borders(Borders::ALL);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let gauge_color = match result.label {
            ChurnLabel::Churn => Color::Red,
            ChurnLabel::NotChurn => Color::Green,
        };
        let gauge = Gauge::default()
            .block(Block::default().title("Churn probability"))
            .gauge_style(Style::default().fg(gauge_color))
            .ratio(result.probability.clamp(0.0, 1.0))
            .label(format!("{:.2}%", result.probability * 100.0));
        frame.render_widget(gauge, chunks[0]);

        let verdict = Paragraph::new(format!("Customer is {}", result.label.display_name()))
            .style(Style::default().fg(gauge_color).add_modifier(Modifier::BOLD));
        frame.render_widget(verdict, chunks[1]);

        let hint = Paragraph::new("Enter/Esc: close and reset inputs")
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(hint, chunks[2]);
    }
}

/// Cycle a categorical value through the fitted category list.
fn cycle(options: &[String], current: &str, delta: i64) -> String {
    let n = options.len() as i64;
    let idx = options
        .iter()
        .position(|o| o == current)
        .map(|i| i as i64)
        .unwrap_or(0);
    let next = (idx + delta).rem_euclid(n);
    options[next as usize].clone()
}

fn step_in_range(value: i64, delta: i64, range: (i64, i64)) -> i64 {
    value.saturating_add(delta).clamp(range.0, range.1)
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::store::fixtures::artifact_files;

    fn leaked_store() -> &'static ArtifactStore {
        Box::leak(Box::new(ArtifactStore::from_files(artifact_files()).unwrap()))
    }

    #[test]
    fn closing_result_popup_restores_default_record() {
        let store = leaked_store();
        let mut app = App::new(store);

        // Mutate several fields, then score.
        app.record.age = 55;
        app.record.credit_score = 820;
        app.record.balance = 125000.0;
        app.record.geography = store.geography_categories().last().unwrap().clone();
        app.record.active_member = false;
        app.selected_field = 6;
        app.result = Some(PredictionResult::from_probability(0.9));

        app.handle_popup(KeyCode::Enter).unwrap();

        assert_eq!(app.record, CustomerRecord::default_for(store));
        assert!(app.result.is_none());
        assert_eq!(app.selected_field, 0);
    }

    #[test]
    fn popup_ignores_other_keys_and_keeps_state() {
        let store = leaked_store();
        let mut app = App::new(store);
        app.record.age = 40;
        app.result = Some(PredictionResult::from_probability(0.2));

        app.handle_popup(KeyCode::Left).unwrap();

        assert!(app.result.is_some());
        assert_eq!(app.record.age, 40);
    }

    #[test]
    fn cycle_wraps_both_directions() {
        let opts = vec!["France".to_string(), "Germany".to_string(), "Spain".to_string()];
        assert_eq!(cycle(&opts, "Spain", 1), "France");
        assert_eq!(cycle(&opts, "France", -1), "Spain");
        assert_eq!(cycle(&opts, "France", 1), "Germany");
    }

    #[test]
    fn step_in_range_clamps_at_bounds() {
        assert_eq!(step_in_range(18, -1, AGE_RANGE), 18);
        assert_eq!(step_in_range(92, 1, AGE_RANGE), 92);
        assert_eq!(step_in_range(30, 1, AGE_RANGE), 31);
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect { x: 0, y: 0, width: 80, height: 24 };
        let popup = centered_rect(area, 50, 9);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }
}
