//! Horizontal bar chart for terminal output.
//!
//! Fixed-width and deterministic, for quick visual checks without opening the
//! SVG. One block per metric; every result gets an `orig` bar (`#`) and a
//! `trim` bar (`=`) scaled against the largest value in that block.

use crate::domain::{BatchResults, MetricsResult};
use crate::report::fmt_pct;

const LABEL_WIDTH: usize = 24;

/// Render MAE and RMSE comparison bars. `width` is the bar length in columns.
pub fn render_ascii_bars(results: &BatchResults, outlier_percent: f64, width: usize) -> String {
    let rows = results.results();
    let mut out = String::new();
    out.push_str(&render_block(
        &format!("MAE (top {}% removed)", fmt_pct(outlier_percent)),
        &rows,
        |r| (r.original().mae, r.filtered().mae),
        width,
    ));
    out.push('\n');
    out.push_str(&render_block(
        &format!("RMSE (top {}% removed)", fmt_pct(outlier_percent)),
        &rows,
        |r| (r.original().rmse, r.filtered().rmse),
        width,
    ));
    out
}

fn render_block(
    title: &str,
    rows: &[&MetricsResult],
    values: impl Fn(&MetricsResult) -> (f64, f64),
    width: usize,
) -> String {
    let width = width.max(10);
    let max = rows
        .iter()
        .map(|r| {
            let (a, b) = values(*r);
            a.max(b)
        })
        .fold(0.0_f64, f64::max);

    let lw = LABEL_WIDTH;
    let mut out = format!("{title}\n");
    for r in rows {
        let (orig, trim) = values(*r);
        let label = clip(&r.label(), LABEL_WIDTH);
        out.push_str(&format!(
            "{label:<lw$} orig |{} {orig:.2}\n",
            bar(orig, max, width, '#')
        ));
        out.push_str(&format!(
            "{:<lw$} trim |{} {trim:.2}\n",
            "",
            bar(trim, max, width, '=')
        ));
    }
    out
}

fn bar(value: f64, max: f64, width: usize, ch: char) -> String {
    let filled = if max > 0.0 {
        ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
    } else {
        0
    };
    let mut s: String = std::iter::repeat_n(ch, filled).collect();
    s.extend(std::iter::repeat_n(' ', width - filled));
    s
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('~');
        out
    }
}
