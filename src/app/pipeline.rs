//! One-shot fit pipeline: document in, session protocol, document out.
//!
//! The CLI runs a complete session per invocation: `begin`, an optional
//! sequence of intermediate `update`s simulating a drag, the final `update`,
//! then `end`. Because updates are non-compounding the intermediate steps
//! must not change the result; `--steps` exists precisely to exercise that.

use crate::domain::{FitRunConfig, KeyChange};
use crate::error::AppError;
use crate::extract::CaptureOptions;
use crate::host::memory::{MemoryCurve, MemoryHost};
use crate::io::document::{self, CurveDocument};
use crate::session::{FitControl, Session};

/// Everything a run produced, for reporting/plotting/exports.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub before: CurveDocument,
    pub after: CurveDocument,
    pub captured: usize,
    pub skipped: Vec<(String, String)>,
    pub warnings: Vec<String>,
    /// Curves that received writes in the final update.
    pub curves_updated: usize,
    pub changes: Vec<KeyChange>,
}

/// Load the input document and run one full session over it.
pub fn run_fit(config: &FitRunConfig) -> Result<FitRun, AppError> {
    let doc = document::read_document(&config.input)?;
    run_fit_on_document(doc, config)
}

/// Run one full session over an already-loaded document.
pub fn run_fit_on_document(
    before: CurveDocument,
    config: &FitRunConfig,
) -> Result<FitRun, AppError> {
    if !config.blend.is_finite() {
        return Err(AppError::usage("Blend value must be finite."));
    }

    let mut host = host_from_document(&before);
    let mut session = Session::new(FitControl::new(config.mode));

    let opts = CaptureOptions {
        extend_left: config.extend_left,
        extend_right: config.extend_right,
    };
    let begun = session.begin(&mut host, &opts);

    // Simulated drag: intermediate blend values on the way to the target.
    for i in 1..=config.steps {
        let u = i as f64 / (config.steps + 1) as f64;
        session.update(&mut host, config.blend * u);
    }
    let updated = session.update(&mut host, config.blend);
    session.end(&mut host);

    // Capture-time and update-time skips both reach the operator; the final
    // update's skip set covers the intermediate ones (same snapshot, same
    // mode).
    let mut skipped = begun.skipped;
    skipped.extend(updated.skipped);

    let after = document_from_host(&host, &before);
    let changes = diff_documents(&before, &after);

    Ok(FitRun {
        before,
        after,
        captured: begun.captured,
        skipped,
        warnings: begun.warnings,
        curves_updated: updated.written,
        changes,
    })
}

fn host_from_document(doc: &CurveDocument) -> MemoryHost {
    let curves = doc
        .curves
        .iter()
        .map(|c| MemoryCurve {
            id: c.id.clone(),
            keys: c.keys.iter().map(|k| (k.time, k.value)).collect(),
            selected: c.selected.clone(),
        })
        .collect();
    MemoryHost::new(curves)
}

/// Rebuild a document carrying the host's post-fit values.
///
/// Curve and key order follow the input document; only values change.
fn document_from_host(host: &MemoryHost, before: &CurveDocument) -> CurveDocument {
    let mut after = before.clone();
    for curve in &mut after.curves {
        if let Some(hc) = host.curve(&curve.id) {
            for (key, &(_, value)) in curve.keys.iter_mut().zip(hc.keys.iter()) {
                key.value = value;
            }
        }
    }
    after
}

fn diff_documents(before: &CurveDocument, after: &CurveDocument) -> Vec<KeyChange> {
    let mut changes = Vec::new();
    for (cb, ca) in before.curves.iter().zip(after.curves.iter()) {
        for (index, (kb, ka)) in cb.keys.iter().zip(ca.keys.iter()).enumerate() {
            if kb.value != ka.value {
                changes.push(KeyChange {
                    curve: cb.id.clone(),
                    index,
                    time: kb.time,
                    before: kb.value,
                    after: ka.value,
                });
            }
        }
    }
    changes
}
