//! Error types.
//!
//! - `MetricsError`: why a single input file could not be analyzed. These are
//!   local to one file; the batch keeps going.
//! - `AppError`: process-level failure carrying the exit code for `main`.

use std::path::PathBuf;

use thiserror::Error;

/// Per-file failure taxonomy.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed JSON in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no error data found")]
    NoData,

    #[error("outlier percent must be within [0, 100), got {value}")]
    InvalidParameter { value: f64 },

    #[error("error value at index {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("original {metric} is zero; improvement percentage is undefined")]
    DivisionByZero { metric: &'static str },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MetricsError> for AppError {
    fn from(err: MetricsError) -> Self {
        let exit_code = match err {
            MetricsError::FileNotFound { .. }
            | MetricsError::Parse { .. }
            | MetricsError::Io { .. }
            | MetricsError::InvalidParameter { .. } => 2,
            MetricsError::NoData | MetricsError::NonFiniteValue { .. } => 3,
            MetricsError::DivisionByZero { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_errors_map_to_exit_codes() {
        let missing: AppError = MetricsError::FileNotFound { path: PathBuf::from("a.json") }.into();
        assert_eq!(missing.exit_code(), 2);
        assert!(missing.to_string().contains("a.json"));

        let empty: AppError = MetricsError::NoData.into();
        assert_eq!(empty.exit_code(), 3);

        let zero: AppError = MetricsError::DivisionByZero { metric: "MAE" }.into();
        assert_eq!(zero.exit_code(), 4);
    }
}
