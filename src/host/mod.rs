//! Narrow interfaces to the host curve editor.
//!
//! All host interaction goes through these four traits so the numeric code
//! (`extract`, `fit`, `session`) never touches a concrete animation package:
//!
//! - `SelectionQuery`: what is selected right now
//! - `KeyRead`: times/values by index (evaluated, not raw payload)
//! - `KeyWrite`: write a value back for a given time
//! - `UndoChunks`: bracket a drag gesture in one undo transaction
//!
//! `MemoryHost` is the in-crate adapter used by the CLI and by tests; a real
//! deployment would implement these over the editor's API instead.

use crate::domain::CurveId;

pub mod memory;

pub use memory::MemoryHost;

/// What the editor currently has selected.
pub trait SelectionQuery {
    /// Is there a curve editor to talk to at all?
    fn has_curve_editor(&self) -> bool;

    /// Does the editor report an active key selection?
    fn has_active_selection(&self) -> bool;

    /// Ids of curves with at least one selected key.
    fn selected_curve_ids(&self) -> Vec<CurveId>;

    /// Selected key indices for one curve, in the host's order.
    /// Not necessarily contiguous.
    fn selected_key_indices(&self, curve: &CurveId) -> Vec<usize>;

    /// Total key count for one curve.
    fn key_count(&self, curve: &CurveId) -> usize;
}

/// Read access to keyframe times and evaluated values.
pub trait KeyRead {
    fn key_time(&self, curve: &CurveId, index: usize) -> f64;

    fn key_value(&self, curve: &CurveId, index: usize) -> f64;

    /// Bulk fetch for a contiguous inclusive index range.
    ///
    /// The default implementation loops the per-index accessors; hosts with a
    /// cheap native range query can override it. Callers only use this when
    /// the range is known to be in bounds.
    fn keys_in_range(&self, curve: &CurveId, start: usize, end: usize) -> Vec<(f64, f64)> {
        (start..=end)
            .map(|i| (self.key_time(curve, i), self.key_value(curve, i)))
            .collect()
    }
}

/// Write access: the host matches the key by time, not by index.
pub trait KeyWrite {
    fn set_key_value_at_time(&mut self, curve: &CurveId, time: f64, value: f64);
}

/// Undo transaction bracketing for one interactive gesture.
pub trait UndoChunks {
    fn open_undo_chunk(&mut self);
    fn close_undo_chunk(&mut self);
}

/// Convenience supertrait for call sites that need the whole host surface.
pub trait Host: SelectionQuery + KeyRead + KeyWrite + UndoChunks {}

impl<T: SelectionQuery + KeyRead + KeyWrite + UndoChunks> Host for T {}
