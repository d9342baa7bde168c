//! The curve-construction core.
//!
//! A pure, single-threaded pipeline from an [`InputRecord`] to a
//! [`SampledCurve`]:
//!
//! scale -> slope -> params -> sampler
//!
//! Every operation is a synchronous, side-effect-free computation over value
//! types; concurrent requests need no coordination.

pub mod params;
pub mod sampler;
pub mod scale;
pub mod slope;

pub use params::{parameterize, predict_sigmoid};
pub use sampler::sample;
pub use scale::{signed_from_unit, unit_from_signed};
pub use slope::{estimate_slope, weighted_average};

use crate::domain::{CurveModel, CurveResponse, InputRecord, SATIETY_THRESHOLD};
use crate::error::InvalidInputError;

/// Build the complete renderer-facing response for one request.
///
/// This is the single boundary between the curve math and any renderer:
/// the samples, the derived parameters, and the two annotation values
/// (start balance, satiety threshold).
pub fn build_curve(
    record: &InputRecord,
    model: CurveModel,
) -> Result<CurveResponse, InvalidInputError> {
    sampler::validate(record)?;
    let params = params::parameterize(model, record);
    let curve = sampler::sample_with_params(record, model, &params);
    Ok(CurveResponse {
        curve,
        params,
        start_balance: record.initial_balance,
        satiety_threshold: SATIETY_THRESHOLD,
    })
}
