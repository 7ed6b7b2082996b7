//! Ratatui-based terminal UI.
//!
//! The TUI is a single-page form: a level selector, an experience slider whose
//! bounds follow the level, a role selector, and a predict action. Results are
//! shown as currency text next to a min/avg/max salary chart for the current
//! level and role.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::predictor::Predictor;
use crate::error::AppError;
use crate::report::{fmt_currency, format_headline, format_range_hint, format_salary_lines};

mod chart;
pub mod form;

use chart::{BandSeries, CurveCache, SalaryBandChart};
use form::{Field, Form, FormState};

/// Start the TUI.
pub fn run(predictor: &Predictor) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(predictor);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App<'a> {
    predictor: &'a Predictor,
    form: Form,
    curve: CurveCache,
    status: String,
}

impl<'a> App<'a> {
    fn new(predictor: &'a Predictor) -> Self {
        Self {
            predictor,
            form: Form::new(),
            curve: CurveCache::default(),
            status: "Choose inputs, then press Enter to predict.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.form.select_up(),
            KeyCode::Down => self.form.select_down(),
            KeyCode::Left => self.form.adjust(false),
            KeyCode::Right => self.form.adjust(true),
            KeyCode::Home if self.form.selected() == Field::Years => {
                self.form.set_years(self.form.bounds().min);
            }
            KeyCode::End if self.form.selected() == Field::Years => {
                self.form.set_years(self.form.bounds().max);
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                self.form.submit(self.predictor)?;
                self.status = match self.form.state() {
                    FormState::ResultShown(_) => "Prediction complete.".to_string(),
                    FormState::ErrorShown(_) => "Prediction failed.".to_string(),
                    FormState::Idle | FormState::Predicting => String::new(),
                };
                return Ok(false);
            }
            _ => return Ok(false),
        }
        self.status = format!(
            "{} | {} years | {}",
            self.form.level(),
            self.form.years(),
            self.form.role()
        );
        Ok(false)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Salary Prediction App",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "This app predicts min, average, and max salary based on years of experience, level, and role.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_form(frame, left[0]);
        self.draw_result(frame, left[1]);
        self.draw_chart(frame, columns[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bounds = self.form.bounds();
        let items = vec![
            ListItem::new(format!("Select Level: ‹ {} ›", self.form.level())),
            ListItem::new(format!(
                "Years of Experience: {}",
                slider(bounds.min, bounds.max, self.form.years())
            )),
            ListItem::new(format!("Select Role: ‹ {} ›", self.form.role())),
            ListItem::new(Span::styled(
                format_range_hint(self.form.level().label(), bounds),
                Style::default().fg(Color::Gray),
            )),
        ];

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected().index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Prediction").borders(Borders::ALL);
        let text = match self.form.state() {
            FormState::Idle => Text::from(Line::from(Span::styled(
                "Press Enter to predict salary.",
                Style::default().fg(Color::Gray),
            ))),
            FormState::Predicting => Text::from("Predicting..."),
            FormState::ErrorShown(msg) => Text::from(Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red),
            ))),
            FormState::ResultShown(p) => {
                let mut lines = Vec::new();
                for w in &p.warnings {
                    lines.push(Line::from(Span::styled(
                        w.to_string(),
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    format_headline(p),
                    Style::default().fg(Color::Green),
                )));
                for line in format_salary_lines(p) {
                    lines.push(Line::from(line));
                }
                Text::from(lines)
            }
        };
        let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(p, area);
    }

    fn draw_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Salary band: {} / {}", self.form.level(), self.form.role()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        self.curve.refresh(self.predictor, self.form.level(), self.form.role());
        let curve = match self.curve.curve() {
            Some(Ok(curve)) => curve,
            Some(Err(err)) => {
                let msg = Paragraph::new(format!("Chart unavailable: {err}"))
                    .style(Style::default().fg(Color::Yellow))
                    .wrap(Wrap { trim: true });
                frame.render_widget(msg, inner);
                return;
            }
            None => return,
        };

        let band = BandSeries::from_curve(curve);
        let years = self.form.years();
        let marker = curve
            .iter()
            .find(|(y, _)| *y == years)
            .map(|(y, r)| (f64::from(*y), r.avg));

        let widget = SalaryBandChart {
            min: &band.min,
            avg: &band.avg,
            max: &band.max,
            marker,
            x_bounds: band.x_bounds,
            y_bounds: band.y_bounds,
            x_label: "years",
            y_label: "salary",
            fmt_x: fmt_axis_years,
            fmt_y: fmt_currency,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ field  ←/→ adjust  Home/End min/max  Enter predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_years(v: f64) -> String {
    format!("{v:.0}")
}

/// Text slider, e.g. `2 [───●────] 7  (4)`.
fn slider(min: u32, max: u32, value: u32) -> String {
    const WIDTH: usize = 12;
    let span = max.saturating_sub(min).max(1) as f64;
    let u = f64::from(value.saturating_sub(min)) / span;
    let pos = ((WIDTH - 1) as f64 * u).round() as usize;
    let track: String = (0..WIDTH)
        .map(|i| if i == pos.min(WIDTH - 1) { '●' } else { '─' })
        .collect();
    format!("{min} [{track}] {max}  ({value})")
}
