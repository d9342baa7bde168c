//! Command-line parsing for the digestive-health curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the curve math.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::CurveModel;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ks2", version, about = "Digestive-health balance curves (KS2)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a curve from meal inputs, print a summary, and optionally plot/export.
    Curve(CurveArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `ks2 curve`, but renders the
    /// curve in a terminal UI using Ratatui and lets you adjust inputs live.
    Tui(CurveArgs),
    /// Run the live stomach-fullness decay animation (a standalone demo).
    Decay(DecayArgs),
}

/// Meal inputs and output options shared by `curve` and `tui`.
#[derive(Debug, Parser, Clone)]
pub struct CurveArgs {
    /// Balance at the start of the meal, -1 to 1.
    #[arg(short = 'b', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub balance: f64,

    /// Meal quality, -1 (worst) to 1 (best).
    #[arg(short = 'q', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub quality: f64,

    /// Meal timing, -1 to 1.
    #[arg(short = 't', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub timing: f64,

    /// Meal logistics, -1 to 1.
    #[arg(short = 'l', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub logistics: f64,

    /// Quantity of food to analyze up to (0 = none, 2 = excess).
    #[arg(long, default_value_t = 1.0)]
    pub quantity: f64,

    /// Which curve formulation to use.
    #[arg(short = 'm', long, value_enum, default_value_t = CurveModel::Piecewise)]
    pub model: CurveModel,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the sampled curve to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the curve (model + params + inputs + grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Random seed for the TUI's scenario generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `ks2 curve --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for the decay animation demo.
#[derive(Debug, Parser)]
pub struct DecayArgs {
    /// Starting fullness, 0 to 1.
    #[arg(long, default_value_t = 0.5)]
    pub fullness: f64,

    /// Fullness lost per simulated time unit.
    #[arg(long, default_value_t = 0.01)]
    pub rate: f64,
}
