//! Export sampled curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

/// Write the sampled curve to a CSV file, one row per sample.
pub fn write_samples_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "sample,model,quantity,balance")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let model = format!("{:?}", run.config.model).to_lowercase();
    for (i, (x, y)) in run.response.curve.points.iter().enumerate() {
        writeln!(file, "{i},{model},{x:.10},{y:.10}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
