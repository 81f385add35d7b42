//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - resolves input files
//! - runs the analysis pipeline
//! - prints reports/plots
//! - writes the CSV export and SVG chart

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::domain::{AnalysisConfig, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `trim` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    init_logging();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(&args),
        Command::Sample(args) => handle_sample(&args),
    }
}

fn init_logging() {
    // `try_init` so tests or embedding callers that already set a logger don't panic.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(args);

    let files = resolve_input_files(&config)?;
    if files.is_empty() {
        return Ok(());
    }
    println!("{}", crate::report::format_file_list(&files));

    let run = pipeline::run_analysis(&config, &files)?;

    let failures = crate::report::format_failures(&run.results);
    if !failures.is_empty() {
        println!("{failures}");
    }

    if run.results.is_empty() {
        println!("{}", crate::report::format_comparison_table(&run.results));
        log::warn!("no file could be analyzed; skipping export and plot");
        return Ok(());
    }

    println!(
        "{}",
        crate::report::format_details(&run.results, config.outlier_percent)
    );
    println!("{}", crate::report::format_comparison_table(&run.results));

    if config.terminal_bars {
        println!(
            "{}",
            crate::plot::render_ascii_bars(&run.results, config.outlier_percent, config.bar_width)
        );
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_results_csv(path, &run.results)?;
        println!("Results saved to: {}", path.display());
    }
    if let Some(path) = &config.plot_svg {
        crate::plot::write_comparison_svg(path, &run.results, config.outlier_percent)?;
        println!("Comparison plot saved to: {}", path.display());
    }

    if let Some(sweep) = &run.sweep {
        println!();
        println!("{}", crate::report::format_sweep(&sweep.path, &sweep.runs));
    }

    Ok(())
}

/// Explicit files win; otherwise look for the known candidates in the search
/// directory. When none exist, list the directory's JSON files and return an
/// empty list.
fn resolve_input_files(config: &AnalysisConfig) -> Result<Vec<PathBuf>, AppError> {
    if !config.files.is_empty() {
        return Ok(config.files.clone());
    }

    let found = crate::io::ingest::existing_candidates(&config.search_dir);
    if !found.is_empty() {
        return Ok(found);
    }

    println!("No error files found; check the file paths.");
    println!("JSON files in {}:", config.search_dir.display());
    for f in crate::io::ingest::list_json_files(&config.search_dir)? {
        println!("  - {}", f.display());
    }
    Ok(Vec::new())
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(args);
    let dist = crate::data::generate_errors(&config)?;
    crate::io::ingest::write_error_distribution(&args.out, &dist)?;
    println!(
        "Wrote {} errors ({} / {}) to {}",
        dist.errors.len(),
        dist.model_name,
        dist.split,
        args.out.display()
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        files: args.files.clone(),
        search_dir: args.dir.clone(),
        outlier_percent: args.outlier_percent,
        sweep_percents: if args.no_sweep { Vec::new() } else { args.sweep.clone() },
        export_csv: (!args.no_export).then(|| args.export.clone()),
        plot_svg: (!args.no_plot).then(|| args.plot.clone()),
        terminal_bars: args.bars,
        bar_width: args.width,
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        count: args.count,
        seed: args.seed,
        model_name: args.model.clone(),
        split: args.split.clone(),
        sigma: args.sigma,
        outlier_rate: args.outlier_rate,
        outlier_scale: args.outlier_scale,
    }
}

/// Rewrite argv so `trim` defaults to `trim analyze`.
///
/// Rules:
/// - `trim`                      -> `trim analyze`
/// - `trim -p 2 ...`             -> `trim analyze -p 2 ...`
/// - `trim a.json b.json`        -> `trim analyze a.json b.json`
/// - `trim --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "sample");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}
