//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory when building curves
//! - exported to JSON/CSV
//! - reloaded later for plotting without recomputation

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of samples drawn per curve.
pub const SAMPLE_COUNT: usize = 100;

/// Upper end of the quantity axis (0 = no food, 2 = excess).
pub const DOMAIN_MAX: f64 = 2.0;

/// The "Hara Hachi Bu" quantity: past this point the piecewise model switches
/// from sigmoid growth to linear decay, and charts draw a marker line.
pub const SATIETY_THRESHOLD: f64 = 1.0;

/// Which curve formulation to use.
///
/// Both formulations share the same input normalization and slope estimate;
/// they differ in how the sigmoid is parameterized and sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CurveModel {
    /// Sigmoid up to the satiety threshold, then path-dependent linear decay.
    /// Samples `[0, quantity]`.
    Piecewise,
    /// A single shifted sigmoid anchored at the initial balance.
    /// Always samples `[0, 2]`.
    Continuous,
}

impl CurveModel {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CurveModel::Piecewise => "piecewise (sigmoid + decay)",
            CurveModel::Continuous => "continuous (shifted sigmoid)",
        }
    }
}

/// One curve request: the meal being analyzed.
///
/// The signed fields are expected in `[-1, 1]` but are not clamped; values
/// outside that range flow through the affine maps unchanged. Finiteness and
/// `quantity > 0` are checked by the sampler before any computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Balance at zero quantity, `[-1, 1]`.
    pub initial_balance: f64,
    /// Meal quality signal, `[-1, 1]`.
    pub quality: f64,
    /// Meal timing signal, `[-1, 1]`.
    pub timing: f64,
    /// Meal logistics signal, `[-1, 1]`.
    pub logistics: f64,
    /// Quantity of food to analyze up to, `(0, 2]`.
    pub quantity: f64,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            initial_balance: 0.0,
            quality: 0.0,
            timing: 0.0,
            logistics: 0.0,
            quantity: 1.0,
        }
    }
}

/// Derived sigmoid parameters for one curve request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Asymptotic ceiling `L`.
    pub amplitude: f64,
    /// Steepness `k`.
    pub steepness: f64,
    /// Midpoint `x0` (in units of quantity).
    pub midpoint: f64,
    /// Baseline `y0` anchoring the curve's start (continuous model only).
    pub baseline: Option<f64>,
}

/// An ordered sequence of `(quantity, balance)` samples.
///
/// Always [`SAMPLE_COUNT`] samples; the first is exactly
/// `(0, initial_balance)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledCurve {
    pub points: Vec<(f64, f64)>,
}

impl SampledCurve {
    /// Upper end of the sampled domain (x of the last sample).
    pub fn domain_upper(&self) -> f64 {
        self.points.last().map(|&(x, _)| x).unwrap_or(0.0)
    }

    /// Min/max of the sampled balance values.
    pub fn balance_range(&self) -> Option<(f64, f64)> {
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &(_, y) in &self.points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        if min_y.is_finite() && max_y.is_finite() {
            Some((min_y, max_y))
        } else {
            None
        }
    }
}

/// Everything a renderer needs for one curve: the samples plus the two
/// annotations (start point and satiety line). Renderers own all chart
/// state locally; nothing here is shared across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveResponse {
    pub curve: SampledCurve,
    pub params: CurveParams,
    /// y of the start-point annotation at x = 0.
    pub start_balance: f64,
    /// x of the satiety marker line.
    pub satiety_threshold: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults) or from TUI state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub record: InputRecord,
    pub model: CurveModel,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: NaiveDate,
    pub model: CurveModel,
    pub params: CurveParams,
    pub inputs: InputRecord,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub quantity: Vec<f64>,
    pub balance: Vec<f64>,
}
