//! Shared analysis pipeline: load -> trim -> aggregate.
//!
//! Per-file failures are recorded in `BatchResults::failures` and never abort
//! the batch. Only an invalid trim percentage is fatal, and it is rejected
//! before any file is opened.

use std::path::{Path, PathBuf};

use crate::domain::{AnalysisConfig, BatchResults, MetricsResult};
use crate::error::{AppError, MetricsError};
use crate::io::ingest::load_error_distribution;
use crate::metrics::{compute, validate_outlier_percent};

/// Metrics for one file at several trim percentages.
#[derive(Debug)]
pub struct SweepOutput {
    pub path: PathBuf,
    pub runs: Vec<(f64, Result<MetricsResult, MetricsError>)>,
}

/// All computed outputs of a single `trim analyze` run.
#[derive(Debug)]
pub struct RunOutput {
    pub results: BatchResults,
    pub sweep: Option<SweepOutput>,
}

/// Run the batch analysis and, if configured, the sweep over the first file.
pub fn run_analysis(config: &AnalysisConfig, files: &[PathBuf]) -> Result<RunOutput, AppError> {
    let results = analyze_files(files, config.outlier_percent)?;

    let sweep = match files.first() {
        Some(first) if !config.sweep_percents.is_empty() => match sweep_file(first, &config.sweep_percents) {
            Ok(runs) => Some(SweepOutput {
                path: first.clone(),
                runs,
            }),
            Err(e) => {
                log::warn!("skipping sweep: {e}");
                None
            }
        },
        _ => None,
    };

    Ok(RunOutput { results, sweep })
}

/// Analyze each file in order at one trim percentage.
pub fn analyze_files(paths: &[PathBuf], outlier_percent: f64) -> Result<BatchResults, AppError> {
    validate_outlier_percent(outlier_percent)?;

    let mut batch = BatchResults::new();
    for path in paths {
        match analyze_file(path, outlier_percent) {
            Ok(result) => {
                log::info!("analyzed {} ({} errors)", path.display(), result.total_images());
                batch.insert(path.clone(), result);
            }
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                batch.record_failure(path.clone(), e);
            }
        }
    }
    Ok(batch)
}

/// Load and analyze a single file.
pub fn analyze_file(path: &Path, outlier_percent: f64) -> Result<MetricsResult, MetricsError> {
    let dist = load_error_distribution(path)?;
    compute(&dist, path, outlier_percent)
}

/// Load one file once and compute metrics at every percentage in `percents`.
///
/// A bad percentage only fails its own entry.
pub fn sweep_file(
    path: &Path,
    percents: &[f64],
) -> Result<Vec<(f64, Result<MetricsResult, MetricsError>)>, MetricsError> {
    let dist = load_error_distribution(path)?;
    Ok(percents
        .iter()
        .map(|&pct| (pct, compute(&dist, path, pct)))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn config(percent: f64, sweep: Vec<f64>) -> AnalysisConfig {
        AnalysisConfig {
            files: Vec::new(),
            search_dir: PathBuf::from("."),
            outlier_percent: percent,
            sweep_percents: sweep,
            export_csv: None,
            plot_svg: None,
            terminal_bars: false,
            bar_width: 40,
        }
    }

    #[test]
    fn bad_files_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let good = write(
            dir.path(),
            "good.json",
            r#"{"error_distribution": {"model_name": "m", "split": "val", "errors": [1, 2, 3, 4, 5, 6, 7, 8, 9, 100]}}"#,
        );
        let broken = write(dir.path(), "broken.json", "{");
        let empty = write(dir.path(), "empty.json", r#"{"error_distribution": {}}"#);
        let missing = dir.path().join("missing.json");

        let batch = analyze_files(&[missing.clone(), good.clone(), broken.clone(), empty.clone()], 10.0).unwrap();

        assert_eq!(batch.len(), 1);
        assert!(batch.contains(&good));
        assert!(!batch.contains(&missing));
        assert_eq!(batch.failures.len(), 3);
        assert!(matches!(batch.failures[0].error, MetricsError::FileNotFound { .. }));
        assert!(matches!(batch.failures[1].error, MetricsError::Parse { .. }));
        assert!(matches!(batch.failures[2].error, MetricsError::NoData));

        let r = batch.get(&good).unwrap();
        assert_eq!(r.outlier_count(), 1);
        assert!((r.filtered().mae - 5.0).abs() < 1e-9);
    }

    #[test]
    fn results_follow_input_order() {
        let dir = tempdir().unwrap();
        let body = r#"{"error_distribution": {"errors": [1.0, 2.0]}}"#;
        let c = write(dir.path(), "c.json", body);
        let a = write(dir.path(), "a.json", body);
        let b = write(dir.path(), "b.json", body);

        let batch = analyze_files(&[c.clone(), a.clone(), b.clone()], 1.0).unwrap();
        let order: Vec<PathBuf> = batch.iter().map(|(p, _)| p.to_path_buf()).collect();
        assert_eq!(order, vec![c, a, b]);
    }

    #[test]
    fn invalid_percent_is_rejected_up_front() {
        let err = analyze_files(&[PathBuf::from("whatever.json")], 100.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn sweep_runs_on_first_file_only() {
        let dir = tempdir().unwrap();
        let body = r#"{"error_distribution": {"errors": [1, 2, 3, 4, 5, 6, 7, 8, 9, 100]}}"#;
        let first = write(dir.path(), "first.json", body);
        let second = write(dir.path(), "second.json", body);

        let run = run_analysis(&config(1.0, vec![0.5, 1.0, 10.0]), &[first.clone(), second]).unwrap();
        assert_eq!(run.results.len(), 2);

        let sweep = run.sweep.unwrap();
        assert_eq!(sweep.path, first);
        let pcts: Vec<f64> = sweep.runs.iter().map(|(p, _)| *p).collect();
        assert_eq!(pcts, vec![0.5, 1.0, 10.0]);

        let mae: Vec<f64> = sweep.runs.iter().map(|(_, r)| r.as_ref().unwrap().filtered().mae).collect();
        assert!(mae.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn empty_sweep_list_disables_sweep() {
        let dir = tempdir().unwrap();
        let f = write(dir.path(), "f.json", r#"{"error_distribution": {"errors": [1.0]}}"#);
        let run = run_analysis(&config(1.0, Vec::new()), &[f]).unwrap();
        assert!(run.sweep.is_none());
    }
}
