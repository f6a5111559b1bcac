//! Interactive session controller.
//!
//! A `Session` owns the state for one logical control (e.g. one slider):
//! the snapshot captured at `begin`, the configured fit mode/range, and the
//! last applied blend value. There are no module-level globals; multi-slider
//! hosts create one `Session` per control and the protocol stays safe by
//! construction.
//!
//! Protocol:
//!
//! - `begin` captures the baseline and opens one undo chunk. Re-entrant
//!   `begin` while active is a no-op, so a drag gesture that fires many
//!   events opens exactly one chunk.
//! - `update(t)` recomputes every curve from the immutable snapshot, never
//!   from a previous update's output. Dragging back and forth is therefore
//!   exactly reversible.
//! - `end` closes the undo chunk, drops the snapshot, and resets the control
//!   value to neutral. Commit and cancel are the same operation here: all
//!   writes are already applied, and the host's undo chunk is the recovery
//!   mechanism.
//!
//! `update`/`end` while inactive are no-ops, not errors: interactive UI event
//! ordering cannot be fully guaranteed by the caller.

use crate::domain::{CurveId, FitMode, Selection};
use crate::extract::{self, CaptureOptions};
use crate::fit;
use crate::host::Host;

/// Configuration for one logical control, fixed at construction time.
#[derive(Debug, Clone, Copy)]
pub struct FitControl {
    pub mode: FitMode,
    /// Valid blend range; `update` clamps into it.
    pub range: (f64, f64),
}

impl FitControl {
    /// A control with the mode's natural range.
    pub fn new(mode: FitMode) -> Self {
        Self {
            mode,
            range: mode.blend_range(),
        }
    }

    fn clamp(&self, t: f64) -> f64 {
        let (lo, hi) = self.range;
        t.clamp(lo, hi)
    }
}

/// What `begin` did (for reporting; an already-active session reports only
/// `already_active`).
#[derive(Debug, Clone, Default)]
pub struct BeginOutcome {
    pub already_active: bool,
    /// Curves captured into the snapshot.
    pub captured: usize,
    pub skipped: Vec<(CurveId, String)>,
    pub warnings: Vec<String>,
}

/// What one `update` call did.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    /// Curves whose interior keys were rewritten.
    pub written: usize,
    /// Snapshot curves skipped as arithmetically degenerate for this mode,
    /// with a human-readable reason.
    pub skipped: Vec<(CurveId, String)>,
}

/// Why a snapshot curve cannot be transformed at update time.
fn degenerate_reason(mode: FitMode) -> String {
    match mode {
        FitMode::Scale => "zero-length interior span; scale target undefined".to_string(),
        FitMode::SkewBoth | FitMode::SkewEither => {
            "zero interior time span; skew weights undefined".to_string()
        }
    }
}

/// State for one interactive fit session.
#[derive(Debug, Clone)]
pub struct Session {
    control: FitControl,
    /// `Some` while active. The selection inside is never mutated.
    snapshot: Option<Selection>,
    /// Last applied blend value; neutral while inactive.
    value: f64,
}

impl Session {
    pub fn new(control: FitControl) -> Self {
        Self {
            value: control.mode.neutral(),
            control,
            snapshot: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn control(&self) -> &FitControl {
        &self.control
    }

    /// Last applied blend value (neutral while inactive).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Capture the selection and open the undo chunk.
    ///
    /// An empty capture (nothing selected, or every curve skipped) still
    /// activates the session; subsequent updates are then no-ops.
    pub fn begin<H: Host>(&mut self, host: &mut H, opts: &CaptureOptions) -> BeginOutcome {
        if self.is_active() {
            return BeginOutcome {
                already_active: true,
                ..BeginOutcome::default()
            };
        }

        let capture = extract::capture_selection(host, opts);
        let outcome = BeginOutcome {
            already_active: false,
            captured: capture.selection.len(),
            skipped: capture.skipped,
            warnings: capture.warnings,
        };

        host.open_undo_chunk();
        self.snapshot = Some(capture.selection);
        outcome
    }

    /// Recompute every snapshot curve at blend `t` and write the results
    /// back at the original key times.
    ///
    /// Curves the transform declares degenerate are skipped but reported in
    /// the outcome, so callers can surface them to the operator instead of
    /// losing them silently.
    pub fn update<H: Host>(&mut self, host: &mut H, t: f64) -> UpdateOutcome {
        let Some(snapshot) = &self.snapshot else {
            return UpdateOutcome::default();
        };

        let t = self.control.clamp(t);
        self.value = t;

        let mut outcome = UpdateOutcome::default();
        for curve in &snapshot.curves {
            let Some(new_values) = fit::apply(self.control.mode, &curve.series, t) else {
                // Arithmetically degenerate for this transform: skip the
                // curve, keep servicing the others.
                outcome
                    .skipped
                    .push((curve.id.clone(), degenerate_reason(self.control.mode)));
                continue;
            };

            for (time, value) in curve.series.interior_times().iter().zip(new_values) {
                host.set_key_value_at_time(&curve.id, *time, value);
            }
            outcome.written += 1;
        }
        outcome
    }

    /// Close the undo chunk, drop the snapshot, reset the control to neutral.
    /// Returns false when no session was active.
    pub fn end<H: Host>(&mut self, host: &mut H) -> bool {
        if self.snapshot.take().is_none() {
            return false;
        }
        host.close_undo_chunk();
        self.value = self.control.mode.neutral();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryCurve, MemoryHost};

    const TOL: f64 = 1e-12;

    fn demo_host() -> MemoryHost {
        MemoryHost::new(vec![
            MemoryCurve {
                id: "a".to_string(),
                keys: vec![(0.0, 0.0), (1.0, 1.0), (2.0, 3.0), (3.0, 5.0), (4.0, 10.0)],
                selected: vec![1, 2, 3],
            },
            // Flat curve: excluded from the snapshot at capture time.
            MemoryCurve {
                id: "flat".to_string(),
                keys: vec![(0.0, 2.0), (1.0, 2.0), (2.0, 2.0), (3.0, 2.0)],
                selected: vec![1, 2],
            },
        ])
    }

    fn values_of(host: &MemoryHost, id: &str) -> Vec<f64> {
        host.curve(id).unwrap().keys.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn begin_twice_opens_exactly_one_undo_chunk() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));

        let first = session.begin(&mut host, &CaptureOptions::default());
        let second = session.begin(&mut host, &CaptureOptions::default());

        assert!(!first.already_active);
        assert!(second.already_active);
        assert_eq!(host.chunks_opened_total(), 1);
        assert_eq!(host.open_chunks(), 1);
    }

    #[test]
    fn updates_do_not_compound() {
        let opts = CaptureOptions::default();

        // Path A: drag through several values before settling on 1.0.
        let mut host_a = demo_host();
        let mut session_a = Session::new(FitControl::new(FitMode::Scale));
        session_a.begin(&mut host_a, &opts);
        for t in [0.3, 0.9, 0.1, 1.0] {
            session_a.update(&mut host_a, t);
        }
        session_a.end(&mut host_a);

        // Path B: jump straight to 1.0.
        let mut host_b = demo_host();
        let mut session_b = Session::new(FitControl::new(FitMode::Scale));
        session_b.begin(&mut host_b, &opts);
        session_b.update(&mut host_b, 1.0);
        session_b.end(&mut host_b);

        let a = values_of(&host_a, "a");
        let b = values_of(&host_b, "a");
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= TOL, "history-dependent output: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn dragging_back_to_zero_restores_the_baseline() {
        let mut host = demo_host();
        let baseline = values_of(&host, "a");

        let mut session = Session::new(FitControl::new(FitMode::SkewBoth));
        session.begin(&mut host, &CaptureOptions::default());
        session.update(&mut host, 1.0);
        session.update(&mut host, 0.0);
        session.end(&mut host);

        let after = values_of(&host, "a");
        for (x, y) in baseline.iter().zip(after.iter()) {
            assert!((x - y).abs() <= TOL);
        }
    }

    #[test]
    fn pivots_are_never_written() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));
        session.begin(&mut host, &CaptureOptions::default());
        session.update(&mut host, 1.0);
        session.end(&mut host);

        for w in host.writes() {
            assert!(
                w.time > 0.0 && w.time < 4.0,
                "pivot key written at time {}",
                w.time
            );
        }
    }

    #[test]
    fn flat_curve_receives_no_writes() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));
        let outcome = session.begin(&mut host, &CaptureOptions::default());
        session.update(&mut host, 1.0);
        session.end(&mut host);

        assert!(outcome.skipped.iter().any(|(id, _)| id == "flat"));
        assert!(host.writes().iter().all(|w| w.curve != "flat"));
        assert_eq!(values_of(&host, "flat"), vec![2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn update_and_end_while_inactive_are_no_ops() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));

        assert_eq!(session.update(&mut host, 1.0).written, 0);
        assert!(!session.end(&mut host));
        assert!(host.writes().is_empty());
        assert_eq!(host.open_chunks(), 0);
    }

    #[test]
    fn end_resets_the_control_to_neutral() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));
        session.begin(&mut host, &CaptureOptions::default());
        session.update(&mut host, 0.7);
        assert!((session.value() - 0.7).abs() <= TOL);

        assert!(session.end(&mut host));
        assert_eq!(session.value(), 0.0);
        assert!(!session.is_active());
        assert_eq!(host.open_chunks(), 0);

        // A second end is a no-op and must not close anyone else's chunk.
        assert!(!session.end(&mut host));
    }

    #[test]
    fn blend_values_are_clamped_to_the_control_range() {
        let mut host_a = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::Scale));
        session.begin(&mut host_a, &CaptureOptions::default());
        session.update(&mut host_a, 5.0);
        assert_eq!(session.value(), 1.0);

        let mut host_b = demo_host();
        let mut session_b = Session::new(FitControl::new(FitMode::Scale));
        session_b.begin(&mut host_b, &CaptureOptions::default());
        session_b.update(&mut host_b, 1.0);

        assert_eq!(values_of(&host_a, "a"), values_of(&host_b, "a"));
    }

    #[test]
    fn skew_either_session_accepts_negative_blends() {
        let mut host = demo_host();
        let mut session = Session::new(FitControl::new(FitMode::SkewEither));
        session.begin(&mut host, &CaptureOptions::default());
        let outcome = session.update(&mut host, -1.0);
        session.end(&mut host);

        assert_eq!(outcome.written, 1);
        // Left end of the run pulled onto the left pivot.
        assert!((values_of(&host, "a")[1] - 0.0).abs() <= TOL);
    }

    #[test]
    fn empty_capture_still_activates_and_updates_are_no_ops() {
        let mut host = MemoryHost::without_editor();
        let mut session = Session::new(FitControl::new(FitMode::Scale));
        let outcome = session.begin(&mut host, &CaptureOptions::default());

        assert!(!outcome.already_active);
        assert_eq!(outcome.captured, 0);
        assert!(!outcome.warnings.is_empty());
        assert!(session.is_active());
        assert_eq!(session.update(&mut host, 1.0).written, 0);
        assert!(session.end(&mut host));
    }

    #[test]
    fn degenerate_update_skip_is_reported() {
        // Captured (not flat) but unscalable: the interior run starts and
        // ends at the same value, so the scale transform must skip it and
        // say so.
        let mut host = MemoryHost::new(vec![MemoryCurve {
            id: "plateau".to_string(),
            keys: vec![(0.0, 0.0), (1.0, 5.0), (2.0, 5.0), (3.0, 5.0), (4.0, 10.0)],
            selected: vec![1, 2, 3],
        }]);
        let mut session = Session::new(FitControl::new(FitMode::Scale));

        let begun = session.begin(&mut host, &CaptureOptions::default());
        assert_eq!(begun.captured, 1);

        let outcome = session.update(&mut host, 1.0);
        session.end(&mut host);

        assert_eq!(outcome.written, 0);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].0, "plateau");
        assert!(outcome.skipped[0].1.contains("interior span"));
        assert!(host.writes().is_empty());
    }
}
