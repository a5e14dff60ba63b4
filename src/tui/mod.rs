//! Ratatui-based dashboard.
//!
//! Layout: composite gauge and five indicator cards on the left, a detail
//! chart of the selected indicator plus the narrative panel on the right.
//!
//! Each refresh/toggle starts a fresh cycle on a worker thread tagged with a
//! monotonically increasing sequence number. The event loop applies a result
//! only when its tag matches the latest issued sequence, so a superseded
//! cycle (success or failure) can never overwrite newer state.

use std::io;
use std::sync::mpsc;
use std::thread;
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
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline, Wrap},
};

use crate::app::pipeline::{self, CycleOutcome};
use crate::domain::{DataSource, SeriesRole, Severity};
use crate::error::AppError;
use crate::report::narrative;

mod plotters_chart;

use plotters_chart::HistoryChart;

/// Start the dashboard.
pub fn run(source: DataSource) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
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

type CycleMessage = (u64, Result<CycleOutcome, AppError>);

struct App {
    source: DataSource,
    selected: usize,
    status: String,
    loading: bool,
    error: Option<String>,
    outcome: Option<CycleOutcome>,
    /// Sequence number of the most recently started cycle; results tagged
    /// with an older number are stale and get discarded.
    seq: u64,
    tx: mpsc::Sender<CycleMessage>,
    rx: mpsc::Receiver<CycleMessage>,
}

impl App {
    fn new(source: DataSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            source,
            selected: 0,
            status: String::new(),
            loading: false,
            error: None,
            outcome: None,
            seq: 0,
            tx,
            rx,
        };
        app.start_cycle();
        app
    }

    /// Kick off a fresh cycle on a worker thread.
    ///
    /// The previous in-flight cycle (if any) keeps running to completion but
    /// its result will carry a stale sequence number.
    fn start_cycle(&mut self) {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.status = format!("Loading {} data...", self.source.display_name());

        let seq = self.seq;
        let source = self.source;
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The receiver may be gone if the UI exited; nothing to do then.
            let _ = tx.send((seq, pipeline::run_cycle(source)));
        });
    }

    /// Apply any finished cycles, keeping only the newest non-superseded one.
    fn drain_cycles(&mut self) -> bool {
        let mut changed = false;
        while let Ok((seq, result)) = self.rx.try_recv() {
            if seq != self.seq {
                continue; // superseded cycle, discard unexamined
            }
            self.loading = false;
            changed = true;
            match result {
                Ok(outcome) => {
                    self.status = format!(
                        "{} data as of {}",
                        outcome.source.display_name(),
                        outcome.as_of
                    );
                    self.error = None;
                    self.outcome = Some(outcome);
                }
                Err(err) => {
                    // A failed current cycle clears results; errors are never
                    // rendered alongside stale numbers.
                    self.outcome = None;
                    self.error = Some(err.to_string());
                    self.status = "Cycle failed.".to_string();
                }
            }
        }
        changed
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_cycles() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < SeriesRole::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('s') => {
                self.source = self.source.toggled();
                self.start_cycle();
            }
            KeyCode::Char('r') => {
                self.start_cycle();
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("pulse", Style::default().fg(Color::Cyan)),
            Span::raw(" — five-indicator macro dashboard"),
        ]));

        match &self.outcome {
            Some(outcome) => {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(
                            "source: {} | as-of: {} | composite: {:.1} | ",
                            outcome.source.display_name(),
                            outcome.as_of,
                            outcome.composite,
                        ),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        outcome.status.label(),
                        Style::default()
                            .fg(severity_color(outcome.status.severity()))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("source: {} | no results", self.source.display_name()),
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Loading and error states replace the dashboard; results are never
        // rendered alongside an error.
        if self.loading {
            let msg = Paragraph::new(format!("Loading {} data...", self.source.display_name()))
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }
        if let Some(error) = &self.error {
            let msg = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Error").borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }
        let Some(outcome) = &self.outcome else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(area);

        self.draw_indicators(frame, columns[0], outcome);
        self.draw_detail(frame, columns[1], outcome);
    }

    fn draw_indicators(&self, frame: &mut ratatui::Frame<'_>, area: Rect, outcome: &CycleOutcome) {
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(std::iter::repeat(Constraint::Length(4)).take(SeriesRole::ALL.len()));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let gauge = Gauge::default()
            .block(Block::default().title("Composite").borders(Borders::ALL))
            .gauge_style(Style::default().fg(severity_color(outcome.status.severity())))
            .percent(outcome.composite.clamp(0.0, 100.0).round() as u16)
            .label(format!(
                "{:.1} — {}",
                outcome.composite,
                outcome.status.label()
            ));
        frame.render_widget(gauge, rows[0]);

        for (i, role) in SeriesRole::ALL.iter().enumerate() {
            self.draw_card(frame, rows[i + 1], outcome, *role, i == self.selected);
        }
    }

    fn draw_card(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        outcome: &CycleOutcome,
        role: SeriesRole,
        selected: bool,
    ) {
        let result = outcome.indicators.get(role);

        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .title(role.display_name())
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let change_color = if result.recent_change >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };
        let line = Line::from(vec![
            Span::raw(format!("{} ", role.format_value(result.current_value))),
            Span::styled(
                format!("{:+.2}", result.recent_change),
                Style::default().fg(change_color),
            ),
            Span::styled(
                format!("  score {:.1}", result.score),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect {
                height: 1,
                ..inner
            },
        );

        if inner.height >= 2 {
            let scaled = scale_for_sparkline(&result.history.iter().map(|p| p.value).collect::<Vec<_>>());
            let spark = Sparkline::default()
                .data(&scaled)
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(
                spark,
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn draw_detail(&self, frame: &mut ratatui::Frame<'_>, area: Rect, outcome: &CycleOutcome) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(area);

        self.draw_chart(frame, chunks[0], outcome);
        self.draw_narrative(frame, chunks[1], outcome);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, outcome: &CycleOutcome) {
        let role = SeriesRole::ALL[self.selected];
        let result = outcome.indicators.get(role);

        let block = Block::default()
            .title(format!("{} — history", role.display_name()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some((line, x_bounds, y_bounds)) = history_series(result) else {
            let msg = Paragraph::new("Not enough data to chart.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = HistoryChart {
            line: &line,
            x_bounds,
            y_bounds,
            x_label: "days",
            y_label: role.display_name().to_string(),
        };
        frame.render_widget(widget, inner);
    }

    fn draw_narrative(&self, frame: &mut ratatui::Frame<'_>, area: Rect, outcome: &CycleOutcome) {
        let text = format!(
            "{}\n\n{}",
            narrative::outlook(outcome.status),
            narrative::agreement_line(&outcome.agreement)
        );
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Narrative").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  s source  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
        Severity::Positive => Color::Green,
    }
}

/// Scale history values into 0..=100 for Ratatui's integer sparkline.
fn scale_for_sparkline(values: &[f64]) -> Vec<u64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if values.is_empty() || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    values
        .iter()
        .map(|&v| {
            if max == min {
                50
            } else {
                (((v - min) / (max - min)) * 100.0).round() as u64
            }
        })
        .collect()
}

/// Build the detail-chart line series: x is days since the first point.
fn history_series(
    result: &crate::domain::IndicatorResult,
) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    if result.history.len() < 2 {
        return None;
    }
    let first = result.history[0].date;

    let line: Vec<(f64, f64)> = result
        .history
        .iter()
        .map(|p| ((p.date - first).num_days() as f64, p.value))
        .collect();

    let x_max = line.last().map(|&(x, _)| x)?;
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &line {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }
    if y_max <= y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    Some((line, [0.0, x_max.max(1.0)], [y_min - pad, y_max + pad]))
}
