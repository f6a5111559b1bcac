//! Read/write curve document JSON files.
//!
//! A curve document is the "portable" representation of a set of animation
//! curves plus a key selection:
//!
//! - per curve: an id, `(time, value)` keys in time order, selected indices
//! - documents written by `pfit` carry a `tool` tag for provenance
//!
//! Validation happens on read so the rest of the pipeline can assume
//! strictly increasing times and in-bounds selections.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyDoc {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveDoc {
    pub id: String,
    pub keys: Vec<KeyDoc>,
    /// Selected key indices. May be empty (curve present but not selected).
    #[serde(default)]
    pub selected: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveDocument {
    #[serde(default = "default_tool")]
    pub tool: String,
    pub curves: Vec<CurveDoc>,
}

fn default_tool() -> String {
    "pfit".to_string()
}

impl CurveDocument {
    pub fn new(curves: Vec<CurveDoc>) -> Self {
        Self {
            tool: default_tool(),
            curves,
        }
    }
}

/// Read and validate a curve document.
pub fn read_document(path: &Path) -> Result<CurveDocument, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open document '{}': {e}", path.display())))?;
    let doc: CurveDocument = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid document JSON: {e}")))?;
    validate_document(&doc)?;
    Ok(doc)
}

/// Write a curve document as pretty JSON.
pub fn write_document(path: &Path, doc: &CurveDocument) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create document '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, doc)
        .map_err(|e| AppError::usage(format!("Failed to write document JSON: {e}")))?;
    Ok(())
}

/// Structural checks: finite, strictly increasing times; in-bounds selected
/// indices; unique curve ids.
pub fn validate_document(doc: &CurveDocument) -> Result<(), AppError> {
    for (i, curve) in doc.curves.iter().enumerate() {
        if curve.id.is_empty() {
            return Err(AppError::data(format!("Curve #{i} has an empty id.")));
        }
        if doc.curves[..i].iter().any(|c| c.id == curve.id) {
            return Err(AppError::data(format!("Duplicate curve id '{}'.", curve.id)));
        }

        for (k, key) in curve.keys.iter().enumerate() {
            if !(key.time.is_finite() && key.value.is_finite()) {
                return Err(AppError::data(format!(
                    "Curve '{}' key #{k} has a non-finite time or value.",
                    curve.id
                )));
            }
            if k > 0 && key.time <= curve.keys[k - 1].time {
                return Err(AppError::data(format!(
                    "Curve '{}' times are not strictly increasing at key #{k}.",
                    curve.id
                )));
            }
        }

        for &idx in &curve.selected {
            if idx >= curve.keys.len() {
                return Err(AppError::data(format!(
                    "Curve '{}' selects key #{idx} but has only {} keys.",
                    curve.id,
                    curve.keys.len()
                )));
            }
        }
    }
    Ok(())
}
