//! Fit-skew: time-weighted re-anchoring of the selected run toward the
//! pivots. Unlike the scale transform this uses key *times*, so early keys
//! follow the left pivot and late keys follow the right one.

use crate::domain::KeySeries;
use crate::fit::{lerp, EPS};

/// Shared skew core, parameterized by the two pivot offsets.
///
/// For each interior key:
///
/// ```text
/// shifted      = value + left_offset
/// time_slope   = 1 - (time - t_first) / (t_last - t_first)   // 1 .. 0
/// offset_value = shifted - right_offset
/// target       = (shifted - offset_value) * time_slope + offset_value
/// out          = lerp(value, target, t)
/// ```
///
/// `time_slope` is 1 at the first interior key and 0 at the last, so the
/// target interpolates from "shifted onto the left pivot" to "offset onto the
/// right pivot" across the run. Returns `None` when the interior time span is
/// degenerate (single interior key, or coincident times).
fn skew_with_offsets(
    series: &KeySeries,
    left_offset: f64,
    right_offset: f64,
    t: f64,
) -> Option<Vec<f64>> {
    let times = &series.times;
    let values = &series.values;
    let n = values.len();

    let t_first = times[1];
    let t_last = times[n - 2];
    let time_span = t_last - t_first;
    if time_span.abs() <= EPS {
        return None;
    }

    let mut out = Vec::with_capacity(n - 2);
    for i in 1..n - 1 {
        let shifted = values[i] + left_offset;
        let time_slope = 1.0 - (times[i] - t_first) / time_span;
        let offset_value = shifted - right_offset;
        let target = (shifted - offset_value) * time_slope + offset_value;
        out.push(lerp(values[i], target, t));
    }
    Some(out)
}

/// Symmetric skew: both pivots pull at once, `t ∈ [0, 1]`.
///
/// The left offset anchors the first interior value on the left pivot; the
/// right offset additionally absorbs the gap between the last interior value
/// and the right pivot, so at `t = 1` both ends of the run land on their
/// pivots.
pub fn fit_skew_both(series: &KeySeries, t: f64) -> Option<Vec<f64>> {
    let values = &series.values;
    let n = values.len();

    let left_offset = values[0] - values[1];
    let right_offset = values[n - 2] - values[n - 1] + left_offset;
    skew_with_offsets(series, left_offset, right_offset, t)
}

/// Asymmetric skew: the sign of `signed_t` (`∈ [-1, 1]`) picks the anchored
/// pivot, the magnitude is the blend parameter.
///
/// - `signed_t >= 0`: left offset forced to 0 — the run's left end holds
///   still while its right end skews onto the right pivot.
/// - `signed_t < 0`: right offset forced to 0 — the run shifts onto the left
///   pivot while its right end keeps its original offset.
pub fn fit_skew_either(series: &KeySeries, signed_t: f64) -> Option<Vec<f64>> {
    let values = &series.values;
    let n = values.len();

    if signed_t >= 0.0 {
        let right_offset = values[n - 2] - values[n - 1];
        skew_with_offsets(series, 0.0, right_offset, signed_t)
    } else {
        let left_offset = values[0] - values[1];
        skew_with_offsets(series, left_offset, 0.0, -signed_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::testutil::{assert_close, ramp_series};

    const TOL: f64 = 1e-12;

    #[test]
    fn skew_both_identity_at_t_zero() {
        let series = ramp_series();
        let out = fit_skew_both(&series, 0.0).unwrap();
        assert_close(&out, series.interior_values(), TOL);
    }

    #[test]
    fn skew_both_anchors_both_ends_at_t_one() {
        let series = ramp_series();
        let out = fit_skew_both(&series, 1.0).unwrap();

        // First interior key lands on the left pivot, last on the right.
        assert!((out[0] - series.left_pivot_value()).abs() <= TOL);
        assert!((out[2] - series.right_pivot_value()).abs() <= TOL);
    }

    #[test]
    fn skew_both_is_affine_in_t() {
        let series = ramp_series();
        let base = series.interior_values().to_vec();
        let full = fit_skew_both(&series, 1.0).unwrap();

        for &t in &[0.2, 0.5, 0.8] {
            let out = fit_skew_both(&series, t).unwrap();
            let expected: Vec<f64> = base
                .iter()
                .zip(full.iter())
                .map(|(&b, &f)| lerp(b, f, t))
                .collect();
            assert_close(&out, &expected, TOL);
        }
    }

    #[test]
    fn skew_either_positive_holds_left_end() {
        let series = ramp_series();
        let out = fit_skew_either(&series, 1.0).unwrap();

        // Left end of the run keeps its original value; right end lands on
        // the right pivot.
        assert!((out[0] - series.values[1]).abs() <= TOL);
        assert!((out[2] - series.right_pivot_value()).abs() <= TOL);
    }

    #[test]
    fn skew_either_negative_pulls_onto_left_pivot() {
        let series = ramp_series();
        let out = fit_skew_either(&series, -1.0).unwrap();

        // Left end of the run lands on the left pivot; right end keeps the
        // shifted value (no right anchoring).
        let left_offset = series.values[0] - series.values[1];
        assert!((out[0] - series.left_pivot_value()).abs() <= TOL);
        assert!((out[2] - (series.values[3] + left_offset)).abs() <= TOL);
    }

    #[test]
    fn skew_either_zero_is_identity_for_both_signs() {
        let series = ramp_series();
        let pos = fit_skew_either(&series, 0.0).unwrap();
        let neg = fit_skew_either(&series, -0.0).unwrap();
        assert_close(&pos, series.interior_values(), TOL);
        assert_close(&neg, series.interior_values(), TOL);
    }

    #[test]
    fn degenerate_time_span_is_skipped() {
        // Single interior key: interior time span is zero.
        let series = KeySeries::new(vec![0.0, 1.0, 2.0], vec![0.0, 4.0, 8.0]);
        assert!(fit_skew_both(&series, 1.0).is_none());
        assert!(fit_skew_either(&series, 0.5).is_none());
    }
}
