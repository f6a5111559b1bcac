//! In-memory host adapter.
//!
//! Stands in for a real curve editor so the CLI can run on JSON documents and
//! tests can drive the full session protocol. Besides implementing the four
//! host traits it keeps light instrumentation:
//!
//! - a write log (`writes`) so tests can assert which keys were touched
//! - undo chunk counters so tests can assert one-chunk-per-gesture

use crate::domain::CurveId;
use crate::host::{KeyRead, KeyWrite, SelectionQuery, UndoChunks};

/// Tolerance for matching a write-back time against a stored key time.
const TIME_MATCH_TOL: f64 = 1e-9;

/// One curve held by the in-memory host.
#[derive(Debug, Clone)]
pub struct MemoryCurve {
    pub id: CurveId,
    /// `(time, value)` pairs in strictly increasing time order.
    pub keys: Vec<(f64, f64)>,
    /// Selected key indices, as the host would report them.
    pub selected: Vec<usize>,
}

/// A single recorded `set_key_value_at_time` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord {
    pub curve: CurveId,
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    curves: Vec<MemoryCurve>,
    editor_present: bool,
    open_chunks: usize,
    chunks_opened_total: usize,
    writes: Vec<WriteRecord>,
}

impl MemoryHost {
    pub fn new(curves: Vec<MemoryCurve>) -> Self {
        Self {
            curves,
            editor_present: true,
            ..Self::default()
        }
    }

    /// A host with no curve editor at all (for the "no editor target" path).
    pub fn without_editor() -> Self {
        Self::default()
    }

    pub fn curves(&self) -> &[MemoryCurve] {
        &self.curves
    }

    pub fn curve(&self, id: &str) -> Option<&MemoryCurve> {
        self.curves.iter().find(|c| c.id == id)
    }

    /// All writes performed so far, in call order.
    pub fn writes(&self) -> &[WriteRecord] {
        &self.writes
    }

    /// Undo chunks currently open (0 or 1 under the session protocol).
    pub fn open_chunks(&self) -> usize {
        self.open_chunks
    }

    /// Total undo chunks ever opened.
    pub fn chunks_opened_total(&self) -> usize {
        self.chunks_opened_total
    }
}

impl SelectionQuery for MemoryHost {
    fn has_curve_editor(&self) -> bool {
        self.editor_present
    }

    fn has_active_selection(&self) -> bool {
        self.curves.iter().any(|c| !c.selected.is_empty())
    }

    fn selected_curve_ids(&self) -> Vec<CurveId> {
        self.curves
            .iter()
            .filter(|c| !c.selected.is_empty())
            .map(|c| c.id.clone())
            .collect()
    }

    fn selected_key_indices(&self, curve: &CurveId) -> Vec<usize> {
        self.curve(curve).map(|c| c.selected.clone()).unwrap_or_default()
    }

    fn key_count(&self, curve: &CurveId) -> usize {
        self.curve(curve).map(|c| c.keys.len()).unwrap_or(0)
    }
}

impl KeyRead for MemoryHost {
    fn key_time(&self, curve: &CurveId, index: usize) -> f64 {
        self.curve(curve).map(|c| c.keys[index].0).unwrap_or(f64::NAN)
    }

    fn key_value(&self, curve: &CurveId, index: usize) -> f64 {
        self.curve(curve).map(|c| c.keys[index].1).unwrap_or(f64::NAN)
    }
}

impl KeyWrite for MemoryHost {
    fn set_key_value_at_time(&mut self, curve: &CurveId, time: f64, value: f64) {
        if let Some(c) = self.curves.iter_mut().find(|c| &c.id == curve) {
            if let Some(key) = c.keys.iter_mut().find(|(t, _)| (t - time).abs() <= TIME_MATCH_TOL) {
                key.1 = value;
                self.writes.push(WriteRecord {
                    curve: curve.clone(),
                    time,
                    value,
                });
            }
        }
    }
}

impl UndoChunks for MemoryHost {
    fn open_undo_chunk(&mut self) {
        self.open_chunks += 1;
        self.chunks_opened_total += 1;
    }

    fn close_undo_chunk(&mut self) {
        self.open_chunks = self.open_chunks.saturating_sub(1);
    }
}
