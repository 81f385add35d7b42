//! Mathematical utilities: mean, RMS and interpolated percentiles.

pub mod stats;

pub use stats::*;
