//! Reporting utilities: warnings and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numeric/session code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::FitRun;
use crate::domain::FitRunConfig;

/// Print operation-level warnings once, to stderr.
pub fn emit_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

/// Format the full run summary (capture stats + write stats).
pub fn format_run_summary(run: &FitRun, config: &FitRunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== pfit - Pivot Fit ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Mode: {} | blend t={:.3} | drag steps: {}\n",
        config.mode.display_name(),
        config.blend,
        config.steps,
    ));
    if config.extend_left || config.extend_right {
        out.push_str(&format!(
            "Extend: left={} right={}\n",
            config.extend_left, config.extend_right
        ));
    }

    out.push_str(&format!(
        "Curves: {} in document | {} captured | {} skipped\n",
        run.before.curves.len(),
        run.captured,
        run.skipped.len(),
    ));
    for (id, reason) in &run.skipped {
        out.push_str(&format!("  skipped '{id}': {reason}\n"));
    }

    out.push_str(&format!(
        "Writes: {} key values across {} curves\n",
        run.changes.len(),
        run.curves_updated,
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitMode, KeyChange};
    use crate::io::document::CurveDocument;

    #[test]
    fn summary_lists_skip_reasons() {
        let run = FitRun {
            before: CurveDocument::new(vec![]),
            after: CurveDocument::new(vec![]),
            captured: 0,
            skipped: vec![("flat".to_string(), "flat segment (all values equal)".to_string())],
            warnings: vec![],
            curves_updated: 0,
            changes: Vec::<KeyChange>::new(),
        };
        let config = FitRunConfig {
            input: "demo.json".into(),
            mode: FitMode::Scale,
            blend: 1.0,
            extend_left: false,
            extend_right: false,
            steps: 0,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            output: None,
            export_csv: None,
        };

        let text = format_run_summary(&run, &config);
        assert!(text.contains("skipped 'flat': flat segment"));
        assert!(text.contains("Mode: scale"));
    }
}
