//! Command-line parsing for the outlier-trimmed metrics tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! metrics code. `crate::app` turns these into resolved configs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trim", version, about = "MAE/RMSE before and after trimming the largest errors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze error files: print metrics, export CSV, draw the comparison plot.
    Analyze(AnalyzeArgs),
    /// Write a synthetic error file with a heavy tail.
    Sample(SampleArgs),
}

/// Options for `trim analyze`.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Error JSON files. When omitted, well-known file names are looked up in `--dir`.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory searched when no files are given.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Percentage of the largest errors to remove, in [0, 100).
    #[arg(short = 'p', long = "percent", default_value_t = 1.0)]
    pub outlier_percent: f64,

    /// Trim percentages compared on the first file.
    #[arg(long, value_delimiter = ',', default_values_t = [0.5, 1.0, 2.0, 5.0])]
    pub sweep: Vec<f64>,

    /// Skip the trim-percentage sweep.
    #[arg(long)]
    pub no_sweep: bool,

    /// Export results to CSV.
    #[arg(long, default_value = "metrics_without_outliers.csv")]
    pub export: PathBuf,

    /// Do not write the CSV export.
    #[arg(long)]
    pub no_export: bool,

    /// Write the comparison chart (SVG).
    #[arg(long, default_value = "metrics_comparison.svg")]
    pub plot: PathBuf,

    /// Do not write the comparison chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Also print a bar chart in the terminal.
    #[arg(long)]
    pub bars: bool,

    /// Bar length (columns) for `--bars`.
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Options for `trim sample`.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output JSON path.
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value = "synthetic")]
    pub model: String,

    #[arg(long, default_value = "val")]
    pub split: String,

    /// Standard deviation of regular errors.
    #[arg(long, default_value_t = 2.0)]
    pub sigma: f64,

    /// Fraction of samples drawn from the outlier component.
    #[arg(long, default_value_t = 0.02)]
    pub outlier_rate: f64,

    /// Outlier spread as a multiple of `--sigma`.
    #[arg(long, default_value_t = 15.0)]
    pub outlier_scale: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["trim", "analyze"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert!(args.files.is_empty());
        assert_eq!(args.outlier_percent, 1.0);
        assert_eq!(args.sweep, vec![0.5, 1.0, 2.0, 5.0]);
        assert_eq!(args.export, PathBuf::from("metrics_without_outliers.csv"));
        assert!(!args.no_plot);
    }

    #[test]
    fn analyze_with_files_and_sweep_list() {
        let cli = Cli::parse_from(["trim", "analyze", "a.json", "b.json", "-p", "2.5", "--sweep", "1,10"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(args.outlier_percent, 2.5);
        assert_eq!(args.sweep, vec![1.0, 10.0]);
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
