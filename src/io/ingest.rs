//! JSON ingest of per-sample error files.
//!
//! Expected layout:
//!
//! ```json
//! { "error_distribution": { "model_name": "GeCo1", "split": "val", "errors": [0.5, 1.2] } }
//! ```
//!
//! A missing `error_distribution`, missing `errors`, or an empty `errors`
//! array are all reported as `MetricsError::NoData`. Missing names default to
//! `"Unknown"`.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::ErrorDistribution;
use crate::error::{AppError, MetricsError};

/// File names looked for when `analyze` is run without explicit inputs.
pub const CANDIDATE_FILES: [&str; 4] = [
    "GeCo1_val_count_errors.json",
    "GeCo1_test_count_errors.json",
    "GeCo_best_val_count_errors.json",
    "GeCo_best_test_count_errors.json",
];

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Serialize, Deserialize)]
struct ErrorFile {
    #[serde(default)]
    error_distribution: Option<ErrorSection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    split: Option<String>,
    #[serde(default)]
    errors: Option<Vec<f64>>,
}

/// Load one error file.
pub fn load_error_distribution(path: &Path) -> Result<ErrorDistribution, MetricsError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => MetricsError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MetricsError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let parsed: ErrorFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| MetricsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let section = parsed.error_distribution.ok_or(MetricsError::NoData)?;
    let errors = section.errors.filter(|e| !e.is_empty()).ok_or(MetricsError::NoData)?;

    Ok(ErrorDistribution {
        model_name: section.model_name.unwrap_or_else(|| UNKNOWN.to_string()),
        split: section.split.unwrap_or_else(|| UNKNOWN.to_string()),
        errors,
    })
}

/// Write an error file in the same layout `load_error_distribution` reads.
pub fn write_error_distribution(path: &Path, dist: &ErrorDistribution) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create error file '{}': {e}", path.display())))?;

    let doc = ErrorFile {
        error_distribution: Some(ErrorSection {
            model_name: Some(dist.model_name.clone()),
            split: Some(dist.split.clone()),
            errors: Some(dist.errors.clone()),
        }),
    };

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write error file: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush error file: {e}")))?;

    Ok(())
}

/// Candidate files that exist in `dir`, in `CANDIDATE_FILES` order.
pub fn existing_candidates(dir: &Path) -> Vec<PathBuf> {
    CANDIDATE_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|p| p.is_file())
        .collect()
}

/// All `.json` files directly inside `dir`, sorted by name.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| AppError::new(2, format!("Failed to list directory '{}': {e}", dir.display())))?;

    let mut out: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
        .collect();
    out.sort();
    Ok(out)
}
