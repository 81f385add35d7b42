//! Export batch results to CSV.
//!
//! One row per analyzed file, in batch order. Floats use Rust's shortest
//! round-trip formatting so a re-read yields the same values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{BatchResults, MetricsResult};
use crate::error::AppError;

/// One CSV row. Field order defines the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRecord {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Split")]
    pub split: String,
    #[serde(rename = "Outlier_Percent")]
    pub outlier_percent: f64,
    #[serde(rename = "Outlier_Threshold")]
    pub outlier_threshold: f64,
    #[serde(rename = "Total_Images")]
    pub total_images: usize,
    #[serde(rename = "Outlier_Count")]
    pub outlier_count: usize,
    #[serde(rename = "Filtered_Count")]
    pub filtered_count: usize,
    #[serde(rename = "Original_MAE")]
    pub original_mae: f64,
    #[serde(rename = "Original_RMSE")]
    pub original_rmse: f64,
    #[serde(rename = "Filtered_MAE")]
    pub filtered_mae: f64,
    #[serde(rename = "Filtered_RMSE")]
    pub filtered_rmse: f64,
    #[serde(rename = "MAE_Improvement_Percent")]
    pub mae_improvement_percent: f64,
    #[serde(rename = "RMSE_Improvement_Percent")]
    pub rmse_improvement_percent: f64,
}

impl From<&MetricsResult> for CsvRecord {
    fn from(r: &MetricsResult) -> Self {
        Self {
            model: r.model_name().to_string(),
            split: r.split().to_string(),
            outlier_percent: r.outlier_percent(),
            outlier_threshold: r.outlier_threshold(),
            total_images: r.total_images(),
            outlier_count: r.outlier_count(),
            filtered_count: r.filtered_count(),
            original_mae: r.original().mae,
            original_rmse: r.original().rmse,
            filtered_mae: r.filtered().mae,
            filtered_rmse: r.filtered().rmse,
            mae_improvement_percent: r.improvement().mae_pct,
            rmse_improvement_percent: r.improvement().rmse_pct,
        }
    }
}

/// Write all batch results to a CSV file.
pub fn write_results_csv(path: &Path, results: &BatchResults) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for (_, result) in results.iter() {
        writer
            .serialize(CsvRecord::from(result))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    log::info!("wrote {} rows to {}", results.len(), path.display());
    Ok(())
}

/// Read a CSV previously produced by `write_results_csv`.
pub fn read_results_csv(path: &Path) -> Result<Vec<CsvRecord>, AppError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    reader
        .deserialize::<CsvRecord>()
        .enumerate()
        .map(|(idx, row)| {
            // +2: 1-based lines plus the header row.
            row.map_err(|e| AppError::new(2, format!("Invalid CSV row at line {}: {e}", idx + 2)))
        })
        .collect()
}
