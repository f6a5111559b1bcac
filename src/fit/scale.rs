//! Fit-scale: shift the selected run onto the left pivot, then scale it about
//! the left pivot until its last key lands on the right pivot.

use crate::domain::KeySeries;
use crate::fit::{lerp, EPS};

/// Compute new interior values for the scale transform at blend `t`.
///
/// Steps, with `v0` = left pivot, `vN` = right pivot:
///
/// 1. `shifted[i] = values[i] + (v0 - values[1])` — the whole series is
///    translated so the first interior value lands on the left pivot.
/// 2. `scale = (vN - v0) / (shifted[last interior] - v0)` — the ratio that
///    puts the last interior shifted value on the right pivot.
/// 3. `target[i] = (shifted[i] - v0) * scale + v0`, then
///    `out[i] = lerp(values[i], target[i], t)`.
///
/// Returns `None` when the interior run's endpoints coincide
/// (`values[1] ≈ values[n-2]`): the scale denominator is exactly that span,
/// so scaling about a zero-length span is undefined and the caller must
/// no-op for this curve.
pub fn fit_scale(series: &KeySeries, t: f64) -> Option<Vec<f64>> {
    let values = &series.values;
    let n = values.len();

    let v0 = values[0];
    let v_right = values[n - 1];
    let first_interior = values[1];
    let last_interior = values[n - 2];

    // After the shift, the last interior value sits at
    // `last_interior + (v0 - first_interior)`, so the scale denominator
    // reduces to the interior span. One check covers both guards.
    let interior_span = last_interior - first_interior;
    if interior_span.abs() <= EPS {
        return None;
    }

    let left_offset = v0 - first_interior;
    let scale = (v_right - v0) / interior_span;

    let mut out = Vec::with_capacity(n - 2);
    for i in 1..n - 1 {
        let shifted = values[i] + left_offset;
        let target = (shifted - v0) * scale + v0;
        out.push(lerp(values[i], target, t));
    }
    Some(out)
}
