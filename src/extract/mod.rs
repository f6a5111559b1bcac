//! Pivot extraction: turn the host's live key selection into immutable
//! `KeySeries` baselines.
//!
//! For each selected curve we bracket the selected run with one unselected
//! *pivot* key on each side (clamped to the curve bounds), fetch the
//! `(time, value)` sequence for pivots + selection, and drop runs that can
//! never produce a meaningful fit. Nothing here is an error: curves that
//! cannot be fit are skipped with a reason, and editor-level problems are
//! surfaced as warnings with an empty selection.

use crate::domain::{CurveId, CurveSnapshot, KeySeries, Selection};
use crate::fit::EPS;
use crate::host::{KeyRead, SelectionQuery};

/// Options for session begin (see the session controller).
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOptions {
    /// Use a synthetic duplicate of the first selected key as the left pivot
    /// instead of reading the real neighbor.
    pub extend_left: bool,
    /// Same for the right side.
    pub extend_right: bool,
}

/// Result of one capture pass over the host selection.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub selection: Selection,
    /// Curves that were passed over, with a human-readable reason.
    pub skipped: Vec<(CurveId, String)>,
    /// Operation-level warnings ("no editor", "nothing selected").
    pub warnings: Vec<String>,
}

/// Capture the current selection into per-curve baselines.
pub fn capture_selection<H>(host: &H, opts: &CaptureOptions) -> Capture
where
    H: SelectionQuery + KeyRead,
{
    let mut capture = Capture::default();

    if !host.has_curve_editor() {
        capture.warnings.push("No curve editor target.".to_string());
        return capture;
    }
    if !host.has_active_selection() {
        capture.warnings.push("Select some keys to fit.".to_string());
        return capture;
    }

    for id in host.selected_curve_ids() {
        match capture_curve(host, &id, opts) {
            Ok(series) => capture.selection.curves.push(CurveSnapshot { id, series }),
            Err(reason) => capture.skipped.push((id, reason)),
        }
    }

    capture
}

/// Capture one curve, or explain why it cannot be fit.
fn capture_curve<H>(host: &H, id: &CurveId, opts: &CaptureOptions) -> Result<KeySeries, String>
where
    H: SelectionQuery + KeyRead,
{
    let selected = host.selected_key_indices(id);
    if selected.is_empty() {
        return Err("no selected keys reported".to_string());
    }
    if selected.len() == 1 {
        return Err("single-key selection has no run to reshape".to_string());
    }

    let num_keys = host.key_count(id);
    let lo = selected.iter().copied().min().unwrap_or(0);
    let hi = selected.iter().copied().max().unwrap_or(0);
    if hi >= num_keys {
        return Err(format!("selected index {hi} out of range ({num_keys} keys)"));
    }

    // Clamp to the curve bounds: a selection touching either end reuses the
    // boundary key itself as its own pivot.
    let left_pivot = lo.saturating_sub(1);
    let right_pivot = (hi + 1).min(num_keys - 1);

    let interior = fetch_interior(host, id, &selected, lo, hi);

    let mut times = Vec::with_capacity(interior.len() + 2);
    let mut values = Vec::with_capacity(interior.len() + 2);

    let (lt, lv) = if opts.extend_left {
        (host.key_time(id, lo), host.key_value(id, lo))
    } else {
        (host.key_time(id, left_pivot), host.key_value(id, left_pivot))
    };
    times.push(lt);
    values.push(lv);

    for (t, v) in &interior {
        times.push(*t);
        values.push(*v);
    }

    let (rt, rv) = if opts.extend_right {
        (host.key_time(id, hi), host.key_value(id, hi))
    } else {
        (host.key_time(id, right_pivot), host.key_value(id, right_pivot))
    };
    times.push(rt);
    values.push(rv);

    let series = KeySeries::new(times, values);
    if series.is_flat(EPS) {
        return Err("flat segment (all values equal)".to_string());
    }

    Ok(series)
}

/// Fetch `(time, value)` for the selected indices, preserving order.
///
/// When the selection is a contiguous, strictly increasing index run we use
/// the host's bulk range fetch; otherwise we fall back to one fetch per
/// index. This is purely an optimization for hosts with a native range
/// query, the two paths return identical data.
fn fetch_interior<H>(
    host: &H,
    id: &CurveId,
    selected: &[usize],
    lo: usize,
    hi: usize,
) -> Vec<(f64, f64)>
where
    H: KeyRead,
{
    let contiguous = selected.len() == hi - lo + 1
        && selected.windows(2).all(|w| w[1] == w[0] + 1);

    if contiguous {
        host.keys_in_range(id, lo, hi)
    } else {
        selected
            .iter()
            .map(|&i| (host.key_time(id, i), host.key_value(id, i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryCurve, MemoryHost};

    fn host_with(keys: Vec<(f64, f64)>, selected: Vec<usize>) -> MemoryHost {
        MemoryHost::new(vec![MemoryCurve {
            id: "a".to_string(),
            keys,
            selected,
        }])
    }

    #[test]
    fn no_editor_yields_warning_and_empty_selection() {
        let host = MemoryHost::without_editor();
        let capture = capture_selection(&host, &CaptureOptions::default());
        assert!(capture.selection.is_empty());
        assert_eq!(capture.warnings, vec!["No curve editor target.".to_string()]);
    }

    #[test]
    fn nothing_selected_yields_warning() {
        let host = host_with(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)], vec![]);
        let capture = capture_selection(&host, &CaptureOptions::default());
        assert!(capture.selection.is_empty());
        assert_eq!(capture.warnings, vec!["Select some keys to fit.".to_string()]);
    }

    #[test]
    fn captures_pivots_plus_selection_in_order() {
        // Keys at times 0..4, values [0, 5, 5, 5, 10], selection =
        // indices [1, 2, 3]: pivots bracket the run on both sides.
        let host = host_with(
            vec![(0.0, 0.0), (1.0, 5.0), (2.0, 5.0), (3.0, 5.0), (4.0, 10.0)],
            vec![1, 2, 3],
        );
        let capture = capture_selection(&host, &CaptureOptions::default());
        assert!(capture.warnings.is_empty());
        assert_eq!(capture.selection.len(), 1);

        let series = &capture.selection.curves[0].series;
        assert_eq!(series.times, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.values, vec![0.0, 5.0, 5.0, 5.0, 10.0]);
    }

    #[test]
    fn boundary_selection_reuses_edge_key_as_pivot() {
        // First and last keys selected: no index -1 / num_keys reads, the
        // pivots are the boundary keys themselves.
        let host = host_with(
            vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)],
            vec![0, 1, 2, 3],
        );
        let capture = capture_selection(&host, &CaptureOptions::default());
        let series = &capture.selection.curves[0].series;

        assert_eq!(series.len(), 6);
        assert_eq!(series.times[0], 0.0);
        assert_eq!(series.values[0], 1.0);
        assert_eq!(series.times[5], 3.0);
        assert_eq!(series.values[5], 4.0);
    }

    #[test]
    fn single_key_selection_is_skipped() {
        let host = host_with(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)], vec![1]);
        let capture = capture_selection(&host, &CaptureOptions::default());
        assert!(capture.selection.is_empty());
        assert_eq!(capture.skipped.len(), 1);
        assert!(capture.skipped[0].1.contains("single-key"));
    }

    #[test]
    fn flat_segment_is_skipped() {
        let host = host_with(
            vec![(0.0, 2.0), (1.0, 2.0), (2.0, 2.0), (3.0, 2.0), (4.0, 2.0)],
            vec![1, 2, 3],
        );
        let capture = capture_selection(&host, &CaptureOptions::default());
        assert!(capture.selection.is_empty());
        assert!(capture.skipped[0].1.contains("flat"));
    }

    #[test]
    fn non_contiguous_selection_uses_per_index_fetch() {
        // Indices 1 and 3 selected (2 left out): the series carries exactly
        // the selected keys between the pivots, in order.
        let host = host_with(
            vec![(0.0, 0.0), (1.0, 2.0), (2.0, 9.0), (3.0, 6.0), (4.0, 8.0)],
            vec![1, 3],
        );
        let capture = capture_selection(&host, &CaptureOptions::default());
        let series = &capture.selection.curves[0].series;

        assert_eq!(series.times, vec![0.0, 1.0, 3.0, 4.0]);
        assert_eq!(series.values, vec![0.0, 2.0, 6.0, 8.0]);
    }

    #[test]
    fn extend_duplicates_boundary_selected_key() {
        let host = host_with(
            vec![(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0)],
            vec![1, 2, 3],
        );
        let opts = CaptureOptions {
            extend_left: true,
            extend_right: true,
        };
        let capture = capture_selection(&host, &opts);
        let series = &capture.selection.curves[0].series;

        // Pivots are synthetic duplicates of the run's own endpoints.
        assert_eq!(series.times, vec![1.0, 1.0, 2.0, 3.0, 3.0]);
        assert_eq!(series.values, vec![2.0, 2.0, 4.0, 6.0, 6.0]);
    }
}
