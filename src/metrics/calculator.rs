//! Original vs. outlier-trimmed MAE/RMSE.
//!
//! Steps:
//! 1. validate inputs (non-empty, finite values, percent in `[0, 100)`)
//! 2. MAE/RMSE over all errors
//! 3. threshold = percentile `100 - outlier_percent` (linear interpolation)
//! 4. keep errors `<= threshold` (ties stay in), recompute MAE/RMSE
//! 5. improvement = percentage decrease relative to the original metric

use std::path::Path;

use crate::domain::{ErrorDistribution, ErrorMetrics, Improvement, MetricsResult};
use crate::error::MetricsError;
use crate::math::{mean, percentile_sorted, root_mean_square};

/// Numeric outcome of trimming, without the identifying fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSummary {
    pub threshold: f64,
    pub total: usize,
    pub outlier_count: usize,
    pub filtered_count: usize,
    pub original: ErrorMetrics,
    pub filtered: ErrorMetrics,
    pub improvement: Improvement,
}

/// Compute the full `MetricsResult` for one loaded file.
pub fn compute(
    distribution: &ErrorDistribution,
    file_path: &Path,
    outlier_percent: f64,
) -> Result<MetricsResult, MetricsError> {
    let trim = trim_outliers(&distribution.errors, outlier_percent)?;

    log::debug!(
        "{}: threshold={:.4} trimmed {}/{} at {}%",
        file_path.display(),
        trim.threshold,
        trim.outlier_count,
        trim.total,
        outlier_percent
    );

    Ok(MetricsResult::from_trim(distribution, file_path, outlier_percent, &trim))
}

/// Trim the largest `outlier_percent`% of `errors` and compare metrics.
pub fn trim_outliers(errors: &[f64], outlier_percent: f64) -> Result<TrimSummary, MetricsError> {
    if errors.is_empty() {
        return Err(MetricsError::NoData);
    }
    validate_outlier_percent(outlier_percent)?;
    if let Some(index) = errors.iter().position(|e| !e.is_finite()) {
        return Err(MetricsError::NonFiniteValue { index });
    }

    let original = error_metrics(errors)?;

    let mut sorted = errors.to_vec();
    sorted.sort_by(f64::total_cmp);
    let threshold = percentile_sorted(&sorted, 100.0 - outlier_percent);

    let filtered: Vec<f64> = errors.iter().copied().filter(|&e| e <= threshold).collect();
    // The threshold never drops below the minimum, so `filtered` is non-empty.
    let filtered_metrics = error_metrics(&filtered)?;

    let improvement = Improvement {
        mae_pct: improvement_pct(original.mae, filtered_metrics.mae, "MAE")?,
        rmse_pct: improvement_pct(original.rmse, filtered_metrics.rmse, "RMSE")?,
    };

    Ok(TrimSummary {
        threshold,
        total: errors.len(),
        outlier_count: errors.len() - filtered.len(),
        filtered_count: filtered.len(),
        original,
        filtered: filtered_metrics,
        improvement,
    })
}

/// Reject trim percentages outside `[0, 100)` (and NaN).
pub fn validate_outlier_percent(outlier_percent: f64) -> Result<(), MetricsError> {
    if (0.0..100.0).contains(&outlier_percent) {
        Ok(())
    } else {
        Err(MetricsError::InvalidParameter { value: outlier_percent })
    }
}

fn error_metrics(values: &[f64]) -> Result<ErrorMetrics, MetricsError> {
    match (mean(values), root_mean_square(values)) {
        (Some(mae), Some(rmse)) => Ok(ErrorMetrics { mae, rmse }),
        _ => Err(MetricsError::NoData),
    }
}

fn improvement_pct(original: f64, filtered: f64, metric: &'static str) -> Result<f64, MetricsError> {
    if original == 0.0 {
        return Err(MetricsError::DivisionByZero { metric });
    }
    Ok((original - filtered) / original * 100.0)
}
