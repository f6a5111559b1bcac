//! Pivot-fit transforms.
//!
//! Pure functions over a `KeySeries` baseline and a blend parameter. Each
//! transform returns the new *interior* values only (pivots are never
//! rewritten) and returns `None` when the series is arithmetically degenerate
//! for that transform, so callers skip the write instead of propagating
//! NaN/inf into the curve.
//!
//! Shared contract (see the per-function docs for the formulas):
//!
//! - deterministic, no side effects, reads only the series and `t`
//! - identity at `t = 0` (output equals the baseline interior values)
//! - component-wise affine in `t`: `out(t) == lerp(baseline, out(1), t)`

use crate::domain::{FitMode, KeySeries};

pub mod scale;
pub mod skew;

pub use scale::fit_scale;
pub use skew::{fit_skew_both, fit_skew_either};

/// Degeneracy tolerance for denominators and flatness checks.
pub const EPS: f64 = 1e-9;

/// Linear blend between `a` (`t = 0`) and `b` (`t = 1`).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Dispatch a blend value to the transform selected by `mode`.
///
/// For `SkewEither` the sign of `t` picks the anchored pivot; the other two
/// modes expect `t` in `[0, 1]`.
pub fn apply(mode: FitMode, series: &KeySeries, t: f64) -> Option<Vec<f64>> {
    match mode {
        FitMode::Scale => fit_scale(series, t),
        FitMode::SkewBoth => fit_skew_both(series, t),
        FitMode::SkewEither => fit_skew_either(series, t),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::domain::KeySeries;

    /// A well-behaved series: pivots 0 and 10, three interior keys.
    pub fn ramp_series() -> KeySeries {
        KeySeries::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![0.0, 1.0, 3.0, 5.0, 10.0],
        )
    }

    pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len(), "length mismatch");
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).abs() <= tol,
                "component {i}: got {a}, expected {e}"
            );
        }
    }
}
