//! `trim-metrics` library crate.
//!
//! The binary (`trim`) is a thin wrapper around this library so that:
//!
//! - the metrics calculator is testable without spawning processes
//! - reporting, export and plotting stay separate, pure consumers of results

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod metrics;
pub mod plot;
pub mod report;
