//! Shared domain types.
//!
//! `MetricsResult` fields are private: callers read them through accessors and
//! only the calculator in `crate::metrics` builds one.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::MetricsError;
use crate::metrics::TrimSummary;

/// Per-sample errors of one model on one split, as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDistribution {
    pub model_name: String,
    pub split: String,
    pub errors: Vec<f64>,
}

/// MAE/RMSE pair over a set of errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    pub mae: f64,
    pub rmse: f64,
}

/// Percentage decrease of the trimmed metrics relative to the original ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    pub mae_pct: f64,
    pub rmse_pct: f64,
}

/// Original vs. trimmed metrics for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    model_name: String,
    split: String,
    file_path: PathBuf,
    outlier_percent: f64,
    outlier_threshold: f64,
    total_images: usize,
    outlier_count: usize,
    filtered_count: usize,
    original: ErrorMetrics,
    filtered: ErrorMetrics,
    improvement: Improvement,
}

impl MetricsResult {
    pub(crate) fn from_trim(
        distribution: &ErrorDistribution,
        file_path: &Path,
        outlier_percent: f64,
        trim: &TrimSummary,
    ) -> Self {
        Self {
            model_name: distribution.model_name.clone(),
            split: distribution.split.clone(),
            file_path: file_path.to_path_buf(),
            outlier_percent,
            outlier_threshold: trim.threshold,
            total_images: trim.total,
            outlier_count: trim.outlier_count,
            filtered_count: trim.filtered_count,
            original: trim.original,
            filtered: trim.filtered,
            improvement: trim.improvement,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn split(&self) -> &str {
        &self.split
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn outlier_percent(&self) -> f64 {
        self.outlier_percent
    }

    /// Errors strictly above this value are trimmed.
    pub fn outlier_threshold(&self) -> f64 {
        self.outlier_threshold
    }

    pub fn total_images(&self) -> usize {
        self.total_images
    }

    pub fn outlier_count(&self) -> usize {
        self.outlier_count
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    pub fn original(&self) -> ErrorMetrics {
        self.original
    }

    pub fn filtered(&self) -> ErrorMetrics {
        self.filtered
    }

    pub fn improvement(&self) -> Improvement {
        self.improvement
    }

    /// Category label used by tables and charts, e.g. `GeCo1 (val)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.model_name, self.split)
    }

    /// Base file name of the input, falling back to the full path.
    pub fn file_name(&self) -> String {
        display_name(&self.file_path)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A file the batch could not analyze, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: MetricsError,
}

/// Ordered results of a batch run, keyed by input path.
///
/// Iteration follows first-insertion order. Inserting a path that is already
/// present replaces its result in place.
#[derive(Debug, Default)]
pub struct BatchResults {
    entries: Vec<(PathBuf, MetricsResult)>,
    pub failures: Vec<FileFailure>,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, result: MetricsResult) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(slot) => slot.1 = result,
            None => self.entries.push((path, result)),
        }
    }

    pub fn record_failure(&mut self, path: PathBuf, error: MetricsError) {
        self.failures.push(FileFailure { path, error });
    }

    pub fn get(&self, path: &Path) -> Option<&MetricsResult> {
        self.entries.iter().find(|(p, _)| p == path).map(|(_, r)| r)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &MetricsResult)> {
        self.entries.iter().map(|(p, r)| (p.as_path(), r))
    }

    /// Results only, in input order.
    pub fn results(&self) -> Vec<&MetricsResult> {
        self.entries.iter().map(|(_, r)| r).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved configuration for an `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Files to analyze, in order. Empty means "discover in `search_dir`".
    pub files: Vec<PathBuf>,
    pub search_dir: PathBuf,
    pub outlier_percent: f64,
    /// Trim percentages for the single-file sweep (first file only).
    pub sweep_percents: Vec<f64>,
    pub export_csv: Option<PathBuf>,
    pub plot_svg: Option<PathBuf>,
    pub terminal_bars: bool,
    pub bar_width: usize,
}

/// Settings for the synthetic error generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub model_name: String,
    pub split: String,
    /// Standard deviation of the bulk (inlier) errors.
    pub sigma: f64,
    /// Fraction of samples drawn from the outlier component.
    pub outlier_rate: f64,
    /// Outlier standard deviation as a multiple of `sigma`.
    pub outlier_scale: f64,
}
