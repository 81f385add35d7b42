//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loaded inputs (`ErrorDistribution`)
//! - calculator outputs (`MetricsResult`, `ErrorMetrics`, `Improvement`)
//! - batch bookkeeping (`BatchResults`, `FileFailure`)
//! - resolved run settings (`AnalysisConfig`, `SampleConfig`)

pub mod types;

pub use types::*;
