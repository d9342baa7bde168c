//! Live stomach-fullness decay animation.
//!
//! A standalone demo, unrelated to the balance-curve pipeline: fullness
//! drains at a fixed rate per simulated time step and is redrawn on a
//! moving time window. `space` pauses, `f` simulates eating a meal, `q`
//! quits. No state or algorithm is shared with the curve core.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Terminal,
};

use crate::cli::DecayArgs;
use crate::error::AppError;
use crate::tui::TerminalGuard;

/// Simulated time advanced per animation frame.
const TIME_STEP: f64 = 0.1;

/// Wall-clock interval between frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Width of the visible time window.
const WINDOW: f64 = 10.0;

/// Fullness added per simulated meal, capped at 1.0.
const MEAL_BOOST: f64 = 0.3;

/// Advance fullness by one frame: decay with a floor at empty.
fn step(fullness: f64, rate: f64) -> f64 {
    (fullness - rate).max(0.0)
}

/// Eat a meal: bump fullness, capped at full.
fn feed(fullness: f64) -> f64 {
    (fullness + MEAL_BOOST).min(1.0)
}

/// Run the animation until the user quits.
pub fn run(args: DecayArgs) -> Result<(), AppError> {
    if !(args.fullness.is_finite() && (0.0..=1.0).contains(&args.fullness)) {
        return Err(AppError::new(2, "Starting fullness must be in [0, 1]."));
    }
    if !(args.rate.is_finite() && args.rate >= 0.0) {
        return Err(AppError::new(2, "Decay rate must be finite and >= 0."));
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut sim = Simulation::new(args.fullness, args.rate);
    let mut last_frame = Instant::now();

    loop {
        terminal
            .draw(|f| sim.draw(f))
            .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;

        // Short poll so key handling stays responsive between frames.
        if event::poll(Duration::from_millis(25))
            .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
        {
            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => sim.paused = !sim.paused,
                    KeyCode::Char('f') => sim.fullness = feed(sim.fullness),
                    _ => {}
                },
                _ => {}
            }
        }

        if last_frame.elapsed() >= FRAME_INTERVAL {
            sim.tick();
            last_frame = Instant::now();
        }
    }

    Ok(())
}

struct Simulation {
    time: f64,
    fullness: f64,
    rate: f64,
    paused: bool,
    history: Vec<(f64, f64)>,
}

impl Simulation {
    fn new(fullness: f64, rate: f64) -> Self {
        Self {
            time: 0.0,
            fullness,
            rate,
            paused: false,
            history: vec![(0.0, fullness)],
        }
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.time += TIME_STEP;
        self.fullness = step(self.fullness, self.rate);
        self.history.push((self.time, self.fullness));

        // Keep only the visible window (plus one point of lead-in).
        let cutoff = self.time - WINDOW;
        let first_visible = self.history.partition_point(|&(t, _)| t < cutoff);
        if first_visible > 1 {
            self.history.drain(..first_visible - 1);
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_chart(frame, chunks[0]);
        self.draw_footer(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Stomach Fullness").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 20 || inner.height < 8 {
            let msg = Paragraph::new("Chart area too small (resize terminal).")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let x0 = (self.time - WINDOW).max(0.0);
        let x1 = self.time + 1.0;
        let series: Vec<(f64, f64)> = self.history.clone();

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, 0.0..1.0)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("time")
                .y_desc("fullness")
                .x_labels(5)
                .y_labels(5)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(LineSeries::new(
                series.iter().copied(),
                &RGBColor(0, 255, 0),
            ))?;

            Ok(())
        });

        widget.render(inner, frame.buffer_mut());
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let state = if self.paused { "paused" } else { "running" };
        let line = Line::from(vec![
            Span::styled(
                "space pause  f feed  q quit",
                Style::default().fg(Color::Gray),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("t={:.1} fullness={:.2} [{state}]", self.time, self.fullness),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_floors_at_empty() {
        assert_eq!(step(0.005, 0.01), 0.0);
        assert_eq!(step(0.0, 0.01), 0.0);
        assert!((step(0.5, 0.01) - 0.49).abs() < 1e-12);
    }

    #[test]
    fn feeding_caps_at_full() {
        assert_eq!(feed(0.9), 1.0);
        assert!((feed(0.5) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn tick_advances_and_trims_the_window() {
        let mut sim = Simulation::new(0.5, 0.01);
        for _ in 0..200 {
            sim.tick();
        }
        assert!((sim.time - 20.0).abs() < 1e-9);
        // 200 steps of 0.01 drain from 0.5 hits the floor.
        assert_eq!(sim.fullness, 0.0);
        // History retains only the visible window (plus lead-in).
        let first_t = sim.history.first().unwrap().0;
        assert!(first_t >= sim.time - WINDOW - TIME_STEP - 1e-9);
    }

    #[test]
    fn paused_simulation_holds_state() {
        let mut sim = Simulation::new(0.5, 0.01);
        sim.paused = true;
        sim.tick();
        assert_eq!(sim.time, 0.0);
        assert_eq!(sim.fullness, 0.5);
    }
}
