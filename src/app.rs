//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates curve documents
//! - runs the fit session pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::FitRunConfig;
use crate::error::AppError;
use crate::io::document::CurveDoc;

pub mod pipeline;

/// Entry point for the `pfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    crate::report::emit_warnings(&run.warnings);
    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        for (before, after) in run.before.curves.iter().zip(run.after.curves.iter()) {
            if before.selected.is_empty() {
                continue;
            }
            let plot = crate::plot::render_key_plot(
                &before.id,
                &key_points(before),
                &key_points(after),
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.output {
        crate::io::export::write_fitted_document(path, &run.after)?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_changes_csv(path, &run.changes)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let doc = crate::io::document::read_document(&args.input)?;

    for curve in &doc.curves {
        let points = key_points(curve);
        let plot =
            crate::plot::render_key_plot(&curve.id, &points, &points, args.width, args.height);
        println!("{plot}");
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        curves: args.curves,
        keys_per_curve: args.keys,
        seed: args.seed,
    };
    let doc = crate::data::generate_document(&config)?;
    crate::io::document::write_document(&args.output, &doc)?;

    println!(
        "Wrote {} curve(s) x {} keys to {}",
        args.curves,
        args.keys,
        args.output.display()
    );
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitRunConfig {
    FitRunConfig {
        input: args.input.clone(),
        mode: args.mode,
        blend: args.blend,
        extend_left: args.extend_left,
        extend_right: args.extend_right,
        steps: args.steps,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        output: args.output.clone(),
        export_csv: args.export_csv.clone(),
    }
}

fn key_points(curve: &CurveDoc) -> Vec<(f64, f64)> {
    curve.keys.iter().map(|k| (k.time, k.value)).collect()
}
