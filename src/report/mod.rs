//! Reporting: per-file details, comparison tables and sweep summaries.

pub mod format;

pub use format::*;
