//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a computed curve:
//! - model kind + derived parameters
//! - the originating input record
//! - the sampled grid for re-plotting without recomputation
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{CurveFile, CurveGrid};
use crate::error::AppError;

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create curve JSON '{}': {e}", path.display()),
        )
    })?;

    let (quantity, balance): (Vec<f64>, Vec<f64>) =
        run.response.curve.points.iter().copied().unzip();

    let curve = CurveFile {
        tool: "ks2".to_string(),
        generated: chrono::Local::now().date_naive(),
        model: run.config.model,
        params: run.response.params,
        inputs: run.config.record,
        grid: CurveGrid { quantity, balance },
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open curve JSON '{}': {e}", path.display()),
        )
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
