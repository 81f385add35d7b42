//! Input/output helpers.
//!
//! - error-file JSON ingest + input discovery (`ingest`)
//! - result export to CSV (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
