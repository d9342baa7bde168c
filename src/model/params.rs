//! Sigmoid parameterization for both curve models.
//!
//! The sampler relies on two primitive operations:
//! - derive [`CurveParams`] from an input record (per model)
//! - predict the sigmoid branch value at a given quantity
//!
//! The piecewise model uses the unshifted form `L / (1 + exp(-k(x - x0)))`
//! with fixed steepness and midpoint; its decay branch lives in the sampler
//! because it is path-dependent, not pointwise. The continuous model uses
//! the shifted form `(L - y0) / (1 + exp(-k(x - x0))) + y0`, which anchors
//! the curve's left tail at the initial balance instead of 0.

use crate::domain::{CurveModel, CurveParams, InputRecord, SATIETY_THRESHOLD};
use crate::model::slope::{estimate_slope, weighted_average};

/// Piecewise-model steepness `k`.
const PIECEWISE_STEEPNESS: f64 = 1.2;

/// Piecewise-model midpoint `x0` (units of quantity).
const PIECEWISE_MIDPOINT: f64 = 0.4;

/// Continuous-model steepness multiplier applied to the unit-scale
/// weighted average (not the remapped slope).
const CONTINUOUS_STEEPNESS_SCALE: f64 = 5.0;

/// Derive sigmoid parameters from the input record.
///
/// Both models share the same amplitude formula (`initial_balance + slope`,
/// slope on the signed scale). The continuous model derives steepness from
/// the *unit-scale* weighted average instead of the remapped slope; the two
/// scales are preserved exactly as-is for output compatibility.
pub fn parameterize(model: CurveModel, record: &InputRecord) -> CurveParams {
    let avg = weighted_average(record.quality, record.timing, record.logistics);
    let slope = estimate_slope(record.quality, record.timing, record.logistics);
    let amplitude = record.initial_balance + slope;

    match model {
        CurveModel::Piecewise => CurveParams {
            amplitude,
            steepness: PIECEWISE_STEEPNESS,
            midpoint: PIECEWISE_MIDPOINT,
            baseline: None,
        },
        CurveModel::Continuous => CurveParams {
            amplitude,
            steepness: CONTINUOUS_STEEPNESS_SCALE * avg,
            midpoint: SATIETY_THRESHOLD,
            baseline: Some(record.initial_balance),
        },
    }
}

/// Evaluate the sigmoid branch at quantity `x`.
///
/// Dispatches on `params.baseline`: the shifted form when a baseline is
/// present, the unshifted form otherwise.
pub fn predict_sigmoid(x: f64, params: &CurveParams) -> f64 {
    let logistic = 1.0 / (1.0 + (-params.steepness * (x - params.midpoint)).exp());
    match params.baseline {
        Some(y0) => (params.amplitude - y0) * logistic + y0,
        None => params.amplitude * logistic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(balance: f64, q: f64, t: f64, l: f64) -> InputRecord {
        InputRecord {
            initial_balance: balance,
            quality: q,
            timing: t,
            logistics: l,
            quantity: 2.0,
        }
    }

    #[test]
    fn piecewise_uses_fixed_shape_constants() {
        let p = parameterize(CurveModel::Piecewise, &record(-0.2, 0.9, 0.8, 0.7));
        // weighted_average = 0.6*0.95 + 0.2*0.9 + 0.2*0.85 = 0.92
        // slope = (0.92 - 0.5) * 2 = 0.84
        assert!((p.amplitude - 0.64).abs() < 1e-12);
        assert_eq!(p.steepness, 1.2);
        assert_eq!(p.midpoint, 0.4);
        assert_eq!(p.baseline, None);
    }

    #[test]
    fn continuous_anchors_baseline_at_initial_balance() {
        let p = parameterize(CurveModel::Continuous, &record(0.0, 0.65, 0.8, 1.0));
        assert_eq!(p.baseline, Some(0.0));
        assert_eq!(p.midpoint, 1.0);
    }

    #[test]
    fn continuous_steepness_uses_unit_scale_average() {
        // All signals maxed: weighted average is 1.0 on the unit scale, so
        // k = 5.0, while the amplitude uses the remapped slope (1.0).
        let p = parameterize(CurveModel::Continuous, &record(0.0, 1.0, 1.0, 1.0));
        assert!((p.steepness - 5.0).abs() < 1e-12);
        assert!((p.amplitude - 1.0).abs() < 1e-12);

        // Neutral signals: unit average 0.5 gives k = 2.5, slope (and
        // amplitude) 0. The two scales must not be unified.
        let neutral = parameterize(CurveModel::Continuous, &record(0.0, 0.0, 0.0, 0.0));
        assert!((neutral.steepness - 2.5).abs() < 1e-12);
        assert_eq!(neutral.amplitude, 0.0);
    }

    #[test]
    fn amplitude_formula_is_shared_between_models() {
        let r = record(0.3, 0.2, -0.4, 0.6);
        let a = parameterize(CurveModel::Piecewise, &r).amplitude;
        let b = parameterize(CurveModel::Continuous, &r).amplitude;
        assert_eq!(a, b);
    }

    #[test]
    fn shifted_sigmoid_passes_through_baseline_at_left_tail() {
        let p = parameterize(CurveModel::Continuous, &record(-0.5, 0.8, 0.8, 0.8));
        // Far left of the midpoint the logistic term vanishes.
        let y = predict_sigmoid(-100.0, &p);
        assert!((y - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn sigmoid_midpoint_is_halfway_to_amplitude() {
        let p = parameterize(CurveModel::Continuous, &record(0.0, 0.65, 0.8, 1.0));
        let y = predict_sigmoid(p.midpoint, &p);
        let halfway = (p.amplitude + p.baseline.unwrap()) / 2.0;
        assert!((y - halfway).abs() < 1e-12);
    }
}
