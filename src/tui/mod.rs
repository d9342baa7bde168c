//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the five meal inputs and the model
//! selector, then renders the resulting balance curve live: every adjustment
//! recomputes the curve (a fixed 100-sample evaluation, cheap enough to run
//! on every keypress).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::cli::CurveArgs;
use crate::domain::{CurveModel, RunConfig, DOMAIN_MAX};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::BalanceChart;

/// Adjustment step for the signed input fields.
const SIGNAL_STEP: f64 = 0.05;

/// Adjustment step and lower bound for the quantity field. The lower bound
/// stays strictly positive so interactive edits can never produce a record
/// the sampler rejects.
const QUANTITY_STEP: f64 = 0.05;
const QUANTITY_MIN: f64 = 0.05;

/// Default JSON path for the in-TUI export key.
const EXPORT_PATH: &str = "ks2-curve.json";

/// Start the TUI.
pub fn run(args: CurveArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn new() -> Result<Self, AppError> {
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

/// Adjustable fields, in display order.
const FIELDS: [&str; 6] = [
    "Balance",
    "Quality",
    "Timing",
    "Logistics",
    "Quantity",
    "Model",
];

struct App {
    config: RunConfig,
    selected_field: usize,
    status: String,
    rng: StdRng,
    noise: Normal<f64>,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: CurveArgs) -> Result<Self, AppError> {
        let noise = Normal::new(0.0, 0.5)
            .map_err(|e| AppError::new(4, format!("Scenario distribution error: {e}")))?;
        let mut app = Self {
            config: crate::app::run_config_from_args(&args),
            selected_field: 0,
            status: String::new(),
            rng: StdRng::seed_from_u64(args.seed),
            noise,
            run: None,
        };
        app.recompute()?;
        Ok(app)
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
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELDS.len() - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Char('m') => {
                self.toggle_model()?;
            }
            KeyCode::Char('r') => {
                self.random_scenario()?;
            }
            KeyCode::Char('e') => {
                self.export_curve();
            }
            _ => {}
        }

        Ok(false)
    }

    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        let step = delta as f64;
        let r = &mut self.config.record;
        match self.selected_field {
            0 => r.initial_balance = (r.initial_balance + step * SIGNAL_STEP).clamp(-1.0, 1.0),
            1 => r.quality = (r.quality + step * SIGNAL_STEP).clamp(-1.0, 1.0),
            2 => r.timing = (r.timing + step * SIGNAL_STEP).clamp(-1.0, 1.0),
            3 => r.logistics = (r.logistics + step * SIGNAL_STEP).clamp(-1.0, 1.0),
            4 => r.quantity = (r.quantity + step * QUANTITY_STEP).clamp(QUANTITY_MIN, DOMAIN_MAX),
            5 => return self.toggle_model(),
            _ => {}
        }
        self.recompute()?;
        self.status = format!("{}: adjusted", FIELDS[self.selected_field]);
        Ok(())
    }

    fn toggle_model(&mut self) -> Result<(), AppError> {
        self.config.model = match self.config.model {
            CurveModel::Piecewise => CurveModel::Continuous,
            CurveModel::Continuous => CurveModel::Piecewise,
        };
        self.recompute()?;
        self.status = format!("model: {}", self.config.model.display_name());
        Ok(())
    }

    /// Draw a random meal scenario: signals from a clamped normal around
    /// neutral, quantity uniform over the upper part of the axis.
    fn random_scenario(&mut self) -> Result<(), AppError> {
        let r = &mut self.config.record;
        r.initial_balance = self.noise.sample(&mut self.rng).clamp(-1.0, 1.0);
        r.quality = self.noise.sample(&mut self.rng).clamp(-1.0, 1.0);
        r.timing = self.noise.sample(&mut self.rng).clamp(-1.0, 1.0);
        r.logistics = self.noise.sample(&mut self.rng).clamp(-1.0, 1.0);
        r.quantity = self.rng.gen_range(0.25..=DOMAIN_MAX);
        self.recompute()?;
        self.status = "Random scenario.".to_string();
        Ok(())
    }

    fn export_curve(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        match crate::io::curve::write_curve_json(std::path::Path::new(EXPORT_PATH), run) {
            Ok(()) => self.status = format!("Wrote {EXPORT_PATH}"),
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn recompute(&mut self) -> Result<(), AppError> {
        let run = crate::app::pipeline::run_curve(&self.config)?;
        self.run = Some(run);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ks2", Style::default().fg(Color::Cyan)),
            Span::raw(" — digestive-health balance curves"),
        ]));

        lines.push(Line::from(Span::styled(
            format!("model: {}", self.config.model.display_name()),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            let p = &run.response.params;
            let baseline = p
                .baseline
                .map(|y0| format!("{y0:.2}"))
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(Span::styled(
                format!(
                    "slope={:.3} | L={:.3} k={:.3} x0={:.2} y0={baseline}",
                    run.slope, p.amplitude, p.steepness, p.midpoint,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Balance Curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for input...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (x_bounds, y_bounds) = chart_bounds(run);
        let widget = BalanceChart {
            curve: &run.response.curve.points,
            start: (0.0, run.response.start_balance),
            threshold_x: run.response.satiety_threshold,
            x_bounds,
            y_bounds,
            x_label: "quantity of food",
            y_label: "balance",
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let r = &self.config.record;
        let values = [
            format!("{:+.2}", r.initial_balance),
            format!("{:+.2}", r.quality),
            format!("{:+.2}", r.timing),
            format!("{:+.2}", r.logistics),
            format!("{:.2}", r.quantity),
            self.config.model.display_name().to_string(),
        ];

        let items: Vec<ListItem> = FIELDS
            .iter()
            .zip(values.iter())
            .map(|(name, value)| ListItem::new(format!("{name}: {value}")))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Meal Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  m model  r random  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(
                &self.status,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart bounds: x covers the sampled domain, y covers the data expanded to
/// at least the canonical `[-1, 1]` balance axis, with a small pad.
fn chart_bounds(run: &RunOutput) -> ([f64; 2], [f64; 2]) {
    let curve = &run.response.curve;
    let x_upper = curve.domain_upper().max(1e-6);

    let (mut y_min, mut y_max) = curve.balance_range().unwrap_or((-1.0, 1.0));
    y_min = y_min.min(-1.0);
    y_max = y_max.max(1.0);
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ([0.0, x_upper], [y_min - pad, y_max + pad])
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}
