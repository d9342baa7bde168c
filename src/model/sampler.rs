//! Curve sampling: evaluate the chosen model over the quantity domain.

use crate::domain::{
    CurveModel, CurveParams, InputRecord, SampledCurve, DOMAIN_MAX, SAMPLE_COUNT,
    SATIETY_THRESHOLD,
};
use crate::error::InvalidInputError;
use crate::model::params::{parameterize, predict_sigmoid};

/// Balance lost per unit of quantity past the satiety threshold
/// (piecewise model).
const DECAY_RATE: f64 = 0.1;

/// Sample the curve for one request.
///
/// Fails with [`InvalidInputError`] before any computation if a field is
/// non-finite or the quantity is not positive. All other inputs, including
/// out-of-range ones, produce a full curve.
pub fn sample(record: &InputRecord, model: CurveModel) -> Result<SampledCurve, InvalidInputError> {
    validate(record)?;
    let params = parameterize(model, record);
    Ok(sample_with_params(record, model, &params))
}

/// Sample with pre-derived parameters (for callers that already hold them).
pub fn sample_with_params(
    record: &InputRecord,
    model: CurveModel,
    params: &CurveParams,
) -> SampledCurve {
    let upper = match model {
        // The record's quantity bounds the domain...
        CurveModel::Piecewise => record.quantity,
        // ...except for the continuous model, which always covers the full axis.
        CurveModel::Continuous => DOMAIN_MAX,
    };

    let mut points = Vec::with_capacity(SAMPLE_COUNT);

    match model {
        CurveModel::Piecewise => {
            // Left-to-right fold: past the satiety threshold, each sample
            // decays from the *previous sample's* value, so the decay
            // compounds with sample density rather than following a
            // closed-form line from the sigmoid at the threshold. This
            // ordering is part of the output contract.
            let mut prev_y = 0.0;
            for i in 0..SAMPLE_COUNT {
                let u = i as f64 / (SAMPLE_COUNT as f64 - 1.0);
                let x = u * upper;
                let y = if x <= SATIETY_THRESHOLD {
                    predict_sigmoid(x, params)
                } else {
                    prev_y - DECAY_RATE * (x - SATIETY_THRESHOLD)
                };
                points.push((x, y));
                prev_y = y;
            }
        }
        CurveModel::Continuous => {
            for i in 0..SAMPLE_COUNT {
                let u = i as f64 / (SAMPLE_COUNT as f64 - 1.0);
                let x = u * upper;
                points.push((x, predict_sigmoid(x, params)));
            }
        }
    }

    // The unshifted sigmoid rarely passes through the exact starting
    // balance, so the first sample is overridden after the fold. Redundant
    // for the continuous model, which already anchors there.
    points[0].1 = record.initial_balance;

    SampledCurve { points }
}

pub(crate) fn validate(record: &InputRecord) -> Result<(), InvalidInputError> {
    let fields = [
        ("initial_balance", record.initial_balance),
        ("quality", record.quality),
        ("timing", record.timing),
        ("logistics", record.logistics),
        ("quantity", record.quantity),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(InvalidInputError::new(format!(
                "{name} must be finite, got {value}"
            )));
        }
    }
    if record.quantity <= 0.0 {
        return Err(InvalidInputError::new(format!(
            "quantity must be > 0, got {}",
            record.quantity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(balance: f64, q: f64, t: f64, l: f64, quantity: f64) -> InputRecord {
        InputRecord {
            initial_balance: balance,
            quality: q,
            timing: t,
            logistics: l,
            quantity,
        }
    }

    #[test]
    fn first_sample_is_exactly_the_initial_balance() {
        for &model in &[CurveModel::Piecewise, CurveModel::Continuous] {
            let curve = sample(&record(-0.2, 0.9, 0.8, 0.7, 2.0), model).unwrap();
            assert_eq!(curve.points.len(), SAMPLE_COUNT);
            assert_eq!(curve.points[0], (0.0, -0.2));
        }
    }

    #[test]
    fn piecewise_decay_is_path_dependent() {
        let curve = sample(&record(-0.2, 0.9, 0.8, 0.7, 2.0), CurveModel::Piecewise).unwrap();
        let pts = &curve.points;
        let mut checked = 0;
        for i in 1..pts.len() {
            let (x, y) = pts[i];
            if x > SATIETY_THRESHOLD {
                let expected = pts[i - 1].1 - DECAY_RATE * (x - SATIETY_THRESHOLD);
                assert_eq!(y, expected, "decay at x={x} must chain off the previous sample");
                checked += 1;
            }
        }
        assert!(checked > 0, "the domain must reach past the threshold");
    }

    #[test]
    fn piecewise_decay_is_not_a_closed_form_line() {
        // Chaining off the previous sample accumulates more loss than a
        // line from the sigmoid's value at the threshold would.
        let r = record(0.0, 0.9, 0.8, 0.7, 2.0);
        let curve = sample(&r, CurveModel::Piecewise).unwrap();
        let params = parameterize(CurveModel::Piecewise, &r);
        let (x_last, y_last) = *curve.points.last().unwrap();
        let closed_form =
            predict_sigmoid(SATIETY_THRESHOLD, &params) - DECAY_RATE * (x_last - SATIETY_THRESHOLD);
        assert!(y_last < closed_form);
    }

    #[test]
    fn piecewise_domain_follows_quantity() {
        let curve = sample(&record(0.0, 0.0, 0.0, 0.0, 0.8), CurveModel::Piecewise).unwrap();
        assert_eq!(curve.domain_upper(), 0.8);
        // Entirely below the threshold: pure sigmoid, no decay branch.
        assert!(curve.points.iter().all(|&(x, _)| x <= SATIETY_THRESHOLD));
    }

    #[test]
    fn continuous_domain_ignores_quantity() {
        for &quantity in &[0.3, 1.0, 1.7] {
            let curve =
                sample(&record(0.0, 0.5, 0.5, 0.5, quantity), CurveModel::Continuous).unwrap();
            assert_eq!(curve.domain_upper(), DOMAIN_MAX);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let r = record(0.1, 0.4, -0.3, 0.8, 1.5);
        for &model in &[CurveModel::Piecewise, CurveModel::Continuous] {
            let a = sample(&r, model).unwrap();
            let b = sample(&r, model).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn favorable_meal_scenario_piecewise() {
        // balance -0.2, q 0.9, t 0.8, l 0.7 => slope 0.84, amplitude 0.64.
        let r = record(-0.2, 0.9, 0.8, 0.7, 2.0);
        let params = parameterize(CurveModel::Piecewise, &r);
        let slope = crate::model::estimate_slope(r.quality, r.timing, r.logistics);
        assert!((slope - 0.84).abs() < 1e-12);
        assert!((params.amplitude - 0.64).abs() < 1e-12);

        let curve = sample(&r, CurveModel::Piecewise).unwrap();
        assert_eq!(curve.points[0], (0.0, -0.2));
    }

    #[test]
    fn continuous_scenario_inflects_at_the_threshold() {
        // balance 0, q 0.65, t 0.8, l 1 => baseline 0, midpoint 1; the
        // sample nearest x = 1 sits near the inflection halfway up.
        let r = record(0.0, 0.65, 0.8, 1.0, 2.0);
        let params = parameterize(CurveModel::Continuous, &r);
        assert_eq!(params.baseline, Some(0.0));
        assert_eq!(params.midpoint, 1.0);

        let curve = sample(&r, CurveModel::Continuous).unwrap();
        let halfway = params.amplitude / 2.0;
        let (_, y_near) = curve
            .points
            .iter()
            .copied()
            .min_by(|a, b| {
                (a.0 - 1.0)
                    .abs()
                    .partial_cmp(&(b.0 - 1.0).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap();
        assert!((y_near - halfway).abs() < 0.05);
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for &quantity in &[0.0, -1.0] {
            for &model in &[CurveModel::Piecewise, CurveModel::Continuous] {
                let err = sample(&record(0.0, 0.0, 0.0, 0.0, quantity), model);
                assert!(err.is_err(), "quantity={quantity} must be rejected");
            }
        }
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let mut r = record(0.0, 0.0, 0.0, 0.0, 1.0);
        r.quality = f64::NAN;
        assert!(sample(&r, CurveModel::Piecewise).is_err());

        let mut r = record(0.0, 0.0, 0.0, 0.0, 1.0);
        r.initial_balance = f64::INFINITY;
        assert!(sample(&r, CurveModel::Continuous).is_err());
    }

    #[test]
    fn out_of_range_signals_still_produce_a_curve() {
        let curve = sample(&record(0.0, 3.0, -2.0, 1.5, 2.0), CurveModel::Piecewise).unwrap();
        assert_eq!(curve.points.len(), SAMPLE_COUNT);
        assert!(curve.points.iter().all(|&(_, y)| y.is_finite()));
    }
}
