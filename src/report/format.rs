//! Formatted terminal output.
//!
//! Formatting code lives in one place so the calculator stays clean and output
//! changes are localized. Every function returns a `String`; printing is left
//! to the caller.

use std::path::Path;

use crate::domain::{BatchResults, MetricsResult, display_name};
use crate::error::MetricsError;

/// Header line listing the files that will be analyzed.
pub fn format_file_list(files: &[impl AsRef<Path>]) -> String {
    let mut out = format!("Found {} error file(s):\n", files.len());
    for f in files {
        out.push_str(&format!("  - {}\n", f.as_ref().display()));
    }
    out
}

/// Per-file detail blocks, in batch order.
pub fn format_details(results: &BatchResults, outlier_percent: f64) -> String {
    let mut out = format!("=== Metrics after trimming the largest {}% of errors ===\n", fmt_pct(outlier_percent));
    for (path, r) in results.iter() {
        out.push('\n');
        out.push_str(&format_detail(&display_name(path), r));
    }
    out
}

fn format_detail(name: &str, r: &MetricsResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{name}:\n"));
    out.push_str(&format!("  Model: {}\n", r.model_name()));
    out.push_str(&format!("  Split: {}\n", r.split()));
    out.push_str(&format!("  Total images: {}\n", r.total_images()));
    out.push_str(&format!(
        "  Outliers removed: {} (threshold: {:.2})\n",
        r.outlier_count(), r.outlier_threshold()
    ));
    out.push_str(&format!(
        "  Original MAE: {:.3}, RMSE: {:.3}\n",
        r.original().mae, r.original().rmse
    ));
    out.push_str(&format!(
        "  Filtered MAE: {:.3}, RMSE: {:.3}\n",
        r.filtered().mae, r.filtered().rmse
    ));
    out.push_str(&format!("  MAE improvement: {:.2}%\n", r.improvement().mae_pct));
    out.push_str(&format!("  RMSE improvement: {:.2}%\n", r.improvement().rmse_pct));
    out
}

/// Side-by-side comparison table, one row per result.
pub fn format_comparison_table(results: &BatchResults) -> String {
    if results.is_empty() {
        return "No results available.\n".to_string();
    }

    let rule = "=".repeat(108);
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(
        format!(
            "{:<20} {:<10} {:>10} {:>12} {:>8} {:>10} {:>12} {:>8} {:>10}",
            "Model", "Split", "Orig MAE", "Filt MAE", "Impr%", "Orig RMSE", "Filt RMSE", "Impr%", "Outliers"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (_, r) in results.iter() {
        out.push_str(
            format!(
                "{:<20} {:<10} {:>10.3} {:>12.3} {:>8.2} {:>10.3} {:>12.3} {:>8.2} {:>10}",
                truncate(r.model_name(), 20),
                truncate(r.split(), 10),
                r.original().mae,
                r.filtered().mae,
                r.improvement().mae_pct,
                r.original().rmse,
                r.filtered().rmse,
                r.improvement().rmse_pct,
                r.outlier_count(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// MAE at several trim percentages for one file.
pub fn format_sweep(path: &Path, runs: &[(f64, Result<MetricsResult, MetricsError>)]) -> String {
    let mut out = String::new();
    out.push_str("=== MAE across trim percentages ===\n");
    out.push_str(&format!("{}\n", display_name(path)));
    out.push_str(&format!(
        "{:>8} {:>10} {:>12} {:>8}\n",
        "Trim%", "Orig MAE", "Filt MAE", "Impr%"
    ));
    out.push_str(&format!("{:-<8} {:-<10} {:-<12} {:-<8}\n", "", "", "", ""));

    for (pct, run) in runs {
        match run {
            Ok(r) => out.push_str(&format!(
                "{:>8} {:>10.3} {:>12.3} {:>8.2}\n",
                fmt_pct(*pct),
                r.original().mae,
                r.filtered().mae,
                r.improvement().mae_pct,
            )),
            Err(e) => out.push_str(&format!("{:>8} {e}\n", fmt_pct(*pct))),
        }
    }
    out
}

/// One line per skipped file.
pub fn format_failures(results: &BatchResults) -> String {
    let mut out = String::new();
    if results.failures.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped {} file(s):\n", results.failures.len()));
    for f in &results.failures {
        out.push_str(&format!("  - {}: {}\n", f.path.display(), f.error));
    }
    out
}

/// Percent without trailing zeros: `1`, `0.5`, `2.25`.
pub fn fmt_pct(pct: f64) -> String {
    let s = format!("{pct:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::ErrorDistribution;
    use crate::metrics::compute;

    fn sample_batch() -> BatchResults {
        let dist = ErrorDistribution {
            model_name: "GeCo1".to_string(),
            split: "val".to_string(),
            errors: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
        };
        let path = PathBuf::from("data/GeCo1_val_count_errors.json");
        let mut batch = BatchResults::new();
        batch.insert(path.clone(), compute(&dist, &path, 10.0).unwrap());
        batch.record_failure(PathBuf::from("missing.json"), MetricsError::NoData);
        batch
    }

    #[test]
    fn details_show_file_name_and_metrics() {
        let txt = format_details(&sample_batch(), 10.0);
        assert!(txt.starts_with("=== Metrics after trimming the largest 10% of errors ===\n"));
        assert!(txt.contains("GeCo1_val_count_errors.json:\n"));
        assert!(txt.contains("  Outliers removed: 1 (threshold: 18.10)\n"));
        assert!(txt.contains("  Original MAE: 14.500, RMSE: 32.070\n"));
        assert!(txt.contains("  Filtered MAE: 5.000, RMSE: 5.627\n"));
        assert!(txt.contains("  MAE improvement: 65.52%\n"));
    }

    #[test]
    fn comparison_table_row() {
        let txt = format_comparison_table(&sample_batch());
        let row = txt.lines().find(|l| l.starts_with("GeCo1")).unwrap();
        let cols: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cols, vec!["GeCo1", "val", "14.500", "5.000", "65.52", "32.070", "5.627", "82.45", "1"]);
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(format_comparison_table(&BatchResults::new()), "No results available.\n");
    }

    #[test]
    fn failures_are_listed() {
        let txt = format_failures(&sample_batch());
        assert_eq!(txt, "Skipped 1 file(s):\n  - missing.json: no error data found\n");
    }

    #[test]
    fn sweep_lists_each_percent() {
        let dist = ErrorDistribution {
            model_name: "m".to_string(),
            split: "s".to_string(),
            errors: vec![1.0, 2.0, 3.0],
        };
        let path = Path::new("m.json");
        let runs: Vec<_> = [0.5, 100.0]
            .into_iter()
            .map(|p| (p, compute(&dist, path, p)))
            .collect();
        let txt = format_sweep(path, &runs);
        assert!(txt.contains("     0.5      2.000"));
        assert!(txt.contains("outlier percent must be within [0, 100), got 100"));
    }

    #[test]
    fn pct_formatting_drops_trailing_zeros() {
        assert_eq!(fmt_pct(1.0), "1");
        assert_eq!(fmt_pct(0.5), "0.5");
        assert_eq!(fmt_pct(2.25), "2.25");
    }
}
