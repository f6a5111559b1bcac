//! Command-line parsing for the pivot-fit keyframe reshaper.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the numeric/session code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FitMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pfit", version, about = "Pivot-fit keyframe reshaper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one fit session over a curve document and report/export the result.
    Fit(FitArgs),
    /// Render a curve document in the terminal without fitting.
    Plot(PlotArgs),
    /// Generate a sample curve document.
    Sample(SampleArgs),
}

/// Options for a single fit session.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Curve document JSON to fit.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Fit transform driven by the blend value.
    #[arg(short = 'm', long, value_enum, default_value_t = FitMode::Scale)]
    pub mode: FitMode,

    /// Blend value: 0 = untouched, 1 = fully fit. `skew-either` also accepts
    /// negative values (sign selects the anchored pivot).
    #[arg(short = 't', long = "blend", default_value_t = 1.0, allow_negative_numbers = true)]
    pub blend: f64,

    /// Anchor the run's left end on itself instead of the real left neighbor.
    #[arg(long)]
    pub extend_left: bool,

    /// Anchor the run's right end on itself instead of the real right neighbor.
    #[arg(long)]
    pub extend_right: bool,

    /// Intermediate update calls before the final one (drag simulation).
    #[arg(long, default_value_t = 0)]
    pub steps: usize,

    /// Render before/after ASCII plots (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the post-fit document JSON here.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Write per-key changes to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// Options for plotting a document as-is.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve document JSON to render.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for sample document generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Number of curves to generate.
    #[arg(long, default_value_t = 3)]
    pub curves: usize,

    /// Keys per curve (at least 5).
    #[arg(long, default_value_t = 9)]
    pub keys: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Where to write the document JSON.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub output: PathBuf,
}
