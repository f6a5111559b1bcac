//! Export fit results: the post-fit document as JSON, per-key changes as CSV.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::KeyChange;
use crate::error::AppError;
use crate::io::document::{self, CurveDocument};

/// Write the post-fit document JSON.
pub fn write_fitted_document(path: &Path, doc: &CurveDocument) -> Result<(), AppError> {
    document::write_document(path, doc)
}

/// Write the per-key change list to a CSV file.
pub fn write_changes_csv(path: &Path, changes: &[KeyChange]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "curve,index,time,value_before,value_after")
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for c in changes {
        writeln!(
            file,
            "{},{},{:.10},{:.10},{:.10}",
            c.curve, c.index, c.time, c.before, c.after
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
