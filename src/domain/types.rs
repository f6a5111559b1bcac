//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during an interactive fit session
//! - exported to JSON/CSV for inspection
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Identifier of an animation curve inside the host editor.
pub type CurveId = String;

/// Which fit transform to drive from the blend control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Shift-and-scale the selected run so its endpoints land on the pivots.
    Scale,
    /// Time-weighted skew toward both pivots at once.
    SkewBoth,
    /// Skew toward one pivot, chosen by the sign of the blend value.
    SkewEither,
}

impl FitMode {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FitMode::Scale => "scale",
            FitMode::SkewBoth => "skew-both",
            FitMode::SkewEither => "skew-either",
        }
    }

    /// Valid blend range for this mode.
    ///
    /// `skew-either` is bipolar: the sign selects which pivot stays anchored.
    pub fn blend_range(self) -> (f64, f64) {
        match self {
            FitMode::Scale | FitMode::SkewBoth => (0.0, 1.0),
            FitMode::SkewEither => (-1.0, 1.0),
        }
    }

    /// The control value that leaves every curve untouched.
    pub fn neutral(self) -> f64 {
        0.0
    }
}

/// Per-curve snapshot of pivots plus selected keys, in time order.
///
/// Index 0 and index `len() - 1` are the *pivots* (unselected, never written);
/// everything between them is the *interior* (selected, rewritten by the fit
/// transforms). Times are non-decreasing, and strictly increasing except for
/// a synthetic duplicate pivot at either boundary (see `extract`).
#[derive(Debug, Clone, PartialEq)]
pub struct KeySeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl KeySeries {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(times.len() >= 3);
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of interior (selected) keys.
    pub fn interior_len(&self) -> usize {
        self.len().saturating_sub(2)
    }

    pub fn left_pivot_value(&self) -> f64 {
        self.values[0]
    }

    pub fn right_pivot_value(&self) -> f64 {
        self.values[self.len() - 1]
    }

    /// Times of the interior keys, in order.
    pub fn interior_times(&self) -> &[f64] {
        &self.times[1..self.len() - 1]
    }

    /// Values of the interior keys, in order.
    pub fn interior_values(&self) -> &[f64] {
        &self.values[1..self.len() - 1]
    }

    /// True when every value in the series (pivots included) is numerically
    /// equal. A flat segment has no fit target and is skipped at capture time.
    pub fn is_flat(&self, tol: f64) -> bool {
        let first = self.values[0];
        self.values.iter().all(|v| (v - first).abs() <= tol)
    }
}

/// One captured curve: its id plus the immutable key series baseline.
#[derive(Debug, Clone)]
pub struct CurveSnapshot {
    pub id: CurveId,
    pub series: KeySeries,
}

/// Everything captured at session begin: one snapshot per non-degenerate
/// selected curve. Curve ids are unique; order follows the host's selection
/// enumeration.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub curves: Vec<CurveSnapshot>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// A single key whose value changed during a fit run (for exports/reports).
#[derive(Debug, Clone, Serialize)]
pub struct KeyChange {
    pub curve: CurveId,
    pub index: usize,
    pub time: f64,
    pub before: f64,
    pub after: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitRunConfig {
    pub input: PathBuf,
    pub mode: FitMode,
    /// Final blend value applied before `end`.
    pub blend: f64,
    pub extend_left: bool,
    pub extend_right: bool,
    /// Number of intermediate `update` calls before the final one, simulating
    /// a drag gesture. Correctness must not depend on this (non-compounding).
    pub steps: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub output: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}
