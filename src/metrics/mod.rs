//! Metrics calculator: MAE/RMSE before and after percentile outlier trimming.

pub mod calculator;

pub use calculator::*;
