//! Terminal report formatting.
//!
//! We keep formatting code in one place so:
//! - the curve math stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::SATIETY_THRESHOLD;

/// Format the full run summary (inputs + derived parameters + curve stats).
pub fn format_run_summary(run: &RunOutput) -> String {
    let r = &run.config.record;
    let params = &run.response.params;
    let curve = &run.response.curve;

    let mut out = String::new();

    out.push_str("=== ks2 - Digestive Health Curve ===\n");
    out.push_str(&format!("Model: {}\n", run.config.model.display_name()));
    out.push_str(&format!(
        "Inputs: balance={:.2} | quality={:.2} | timing={:.2} | logistics={:.2} | quantity={:.2}\n",
        r.initial_balance, r.quality, r.timing, r.logistics, r.quantity,
    ));
    out.push_str(&format!(
        "Favorability: slope={:.4} (weighted avg {:.4})\n",
        run.slope, run.weighted_avg,
    ));

    let baseline = params
        .baseline
        .map(|y0| format!("{y0:.4}"))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Params: L={:.4} | k={:.4} | x0={:.4} | y0={baseline}\n",
        params.amplitude, params.steepness, params.midpoint,
    ));

    let (y_min, y_max) = curve.balance_range().unwrap_or((0.0, 0.0));
    out.push_str(&format!(
        "Samples: n={} | quantity=[0.00, {:.2}] | balance=[{:.2}, {:.2}]\n",
        curve.points.len(),
        curve.domain_upper(),
        y_min,
        y_max,
    ));

    if let Some(&(x, y)) = nearest_sample(curve.points.as_slice(), SATIETY_THRESHOLD) {
        out.push_str(&format!("Balance near satiety (x={x:.2}): {y:.4}\n"));
    }
    if let Some(&(x, y)) = curve.points.last() {
        out.push_str(&format!("Final balance (x={x:.2}): {y:.4}\n"));
    }

    out
}

/// Format a compact preview table of the sampled curve (every `stride`-th row).
pub fn format_sample_preview(run: &RunOutput, stride: usize) -> String {
    let stride = stride.max(1);
    let mut out = String::new();
    out.push_str("quantity  balance\n");
    for (i, (x, y)) in run.response.curve.points.iter().enumerate() {
        if i % stride == 0 || i == run.response.curve.points.len() - 1 {
            out.push_str(&format!("{x:>8.3}  {y:>7.3}\n"));
        }
    }
    out
}

fn nearest_sample(points: &[(f64, f64)], x_target: f64) -> Option<&(f64, f64)> {
    points.iter().min_by(|a, b| {
        (a.0 - x_target)
            .abs()
            .partial_cmp(&(b.0 - x_target).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_curve;
    use crate::domain::{CurveModel, InputRecord, RunConfig};

    fn run() -> RunOutput {
        run_curve(&RunConfig {
            record: InputRecord {
                initial_balance: -0.2,
                quality: 0.9,
                timing: 0.8,
                logistics: 0.7,
                quantity: 2.0,
            },
            model: CurveModel::Piecewise,
        })
        .unwrap()
    }

    #[test]
    fn summary_names_the_model_and_slope() {
        let text = format_run_summary(&run());
        assert!(text.contains("piecewise"));
        assert!(text.contains("slope=0.8400"));
        assert!(text.contains("L=0.6400"));
    }

    #[test]
    fn preview_includes_first_and_last_samples() {
        let text = format_sample_preview(&run(), 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "quantity  balance");
        assert!(lines[1].starts_with("   0.000"));
        assert!(lines.last().unwrap().starts_with("   2.000"));
    }
}
