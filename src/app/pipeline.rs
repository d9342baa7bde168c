//! Shared "curve pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! record -> slope -> params -> samples
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{CurveResponse, RunConfig};
use crate::error::AppError;
use crate::model;

/// All computed outputs of a single curve run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub config: RunConfig,
    /// Unit-scale weighted average of the meal signals (0.5 = neutral).
    pub weighted_avg: f64,
    /// Signed favorability slope derived from the weighted average.
    pub slope: f64,
    pub response: CurveResponse,
}

/// Execute the curve pipeline and return the computed outputs.
pub fn run_curve(config: &RunConfig) -> Result<RunOutput, AppError> {
    let r = &config.record;
    let response = model::build_curve(r, config.model)?;
    let weighted_avg = model::weighted_average(r.quality, r.timing, r.logistics);
    let slope = model::estimate_slope(r.quality, r.timing, r.logistics);

    Ok(RunOutput {
        config: config.clone(),
        weighted_avg,
        slope,
        response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveModel, InputRecord, SAMPLE_COUNT};

    #[test]
    fn pipeline_produces_a_full_run() {
        let config = RunConfig {
            record: InputRecord::default(),
            model: CurveModel::Piecewise,
        };
        let run = run_curve(&config).unwrap();
        assert_eq!(run.response.curve.points.len(), SAMPLE_COUNT);
        assert_eq!(run.slope, 0.0);
        assert_eq!(run.weighted_avg, 0.5);
    }

    #[test]
    fn invalid_record_maps_to_app_error() {
        let config = RunConfig {
            record: InputRecord {
                quantity: 0.0,
                ..InputRecord::default()
            },
            model: CurveModel::Piecewise,
        };
        let err = run_curve(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
