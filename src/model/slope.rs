//! Favorability slope: the signed combination of the three meal signals.

use crate::model::scale::{signed_from_unit, unit_from_signed};

/// Fixed signal weights. Must sum to 1.0 (table invariant, not checked at
/// runtime); values are kept as-is for output compatibility.
const WEIGHT_QUALITY: f64 = 0.6;
const WEIGHT_TIMING: f64 = 0.2;
const WEIGHT_LOGISTICS: f64 = 0.2;

/// Weighted average of the three signals on the unit scale.
///
/// 0.5 is neutral; under well-formed inputs the result lies in `[0, 1]`.
pub fn weighted_average(quality: f64, timing: f64, logistics: f64) -> f64 {
    WEIGHT_QUALITY * unit_from_signed(quality)
        + WEIGHT_TIMING * unit_from_signed(timing)
        + WEIGHT_LOGISTICS * unit_from_signed(logistics)
}

/// Signed favorability slope in `[-1, 1]` under well-formed inputs:
/// how favorable the meal conditions are, 0 meaning neutral.
pub fn estimate_slope(quality: f64, timing: f64, logistics: f64) -> f64 {
    signed_from_unit(weighted_average(quality, timing, logistics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_agreement_saturates() {
        assert_eq!(estimate_slope(1.0, 1.0, 1.0), 1.0);
        assert_eq!(estimate_slope(-1.0, -1.0, -1.0), -1.0);
    }

    #[test]
    fn neutral_signals_give_zero_slope() {
        assert_eq!(estimate_slope(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn monotone_in_each_signal() {
        let grid = [-1.0, -0.5, 0.0, 0.5, 1.0];
        for w in grid.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            assert!(estimate_slope(lo, 0.3, -0.2) <= estimate_slope(hi, 0.3, -0.2));
            assert!(estimate_slope(0.3, lo, -0.2) <= estimate_slope(0.3, hi, -0.2));
            assert!(estimate_slope(0.3, -0.2, lo) <= estimate_slope(0.3, -0.2, hi));
        }
    }

    #[test]
    fn quality_dominates_the_weighting() {
        // Same total signal, concentrated on different inputs.
        let quality_heavy = estimate_slope(0.9, 0.0, 0.0);
        let timing_heavy = estimate_slope(0.0, 0.9, 0.0);
        assert!(quality_heavy > timing_heavy);
    }
}
