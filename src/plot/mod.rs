//! Comparison plots: SVG (Plotters) for files, text bars for the terminal.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
