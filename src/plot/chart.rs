//! SVG comparison chart rendered with Plotters.
//!
//! Two side-by-side panels (MAE, RMSE). Each result gets a pair of bars,
//! original on the left and trimmed on the right, with the value printed
//! above each bar. The x category is `model (split)`.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::BatchResults;
use crate::error::AppError;
use crate::report::fmt_pct;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 600;
const BAR_WIDTH: f64 = 0.35;
const ORIGINAL_COLOR: RGBColor = RGBColor(240, 128, 128);
const TRIMMED_COLOR: RGBColor = RGBColor(144, 238, 144);

struct Panel<'a> {
    metric: &'a str,
    labels: &'a [String],
    original: Vec<f64>,
    trimmed: Vec<f64>,
}

/// Write the MAE/RMSE comparison chart to `path` as SVG.
///
/// An empty batch is an error (exit code 3); `analyze` skips plotting before
/// that can happen.
pub fn write_comparison_svg(path: &Path, results: &BatchResults, outlier_percent: f64) -> Result<(), AppError> {
    if results.is_empty() {
        return Err(AppError::new(3, "No results available to plot."));
    }

    let rows = results.results();
    let labels: Vec<String> = rows.iter().map(|r| r.label()).collect();
    let mae = Panel {
        metric: "MAE",
        labels: &labels,
        original: rows.iter().map(|r| r.original().mae).collect(),
        trimmed: rows.iter().map(|r| r.filtered().mae).collect(),
    };
    let rmse = Panel {
        metric: "RMSE",
        labels: &labels,
        original: rows.iter().map(|r| r.original().rmse).collect(),
        trimmed: rows.iter().map(|r| r.filtered().rmse).collect(),
    };

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let (left, right) = root.split_horizontally(WIDTH / 2);
    draw_panel(&left, &mae, outlier_percent)?;
    draw_panel(&right, &rmse, outlier_percent)?;

    root.present().map_err(draw_err)?;
    log::info!("wrote comparison plot to {}", path.display());
    Ok(())
}

fn draw_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, panel: &Panel<'_>, outlier_percent: f64) -> Result<(), AppError> {
    let n = panel.labels.len();
    let y_max = panel
        .original
        .iter()
        .chain(panel.trimmed.iter())
        .fold(0.0_f64, |m, &v| m.max(v));
    let y_top = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };
    let label_pad = y_top * 0.01;

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Comparison (remove the top {}%)", panel.metric, fmt_pct(outlier_percent)),
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5_f64..(n as f64 - 0.5), 0.0_f64..y_top)
        .map_err(draw_err)?;

    let category = |x: &f64| -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        panel.labels.get(idx as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&category)
        .x_desc("Model")
        .y_desc(panel.metric)
        .draw()
        .map_err(draw_err)?;

    let original_style = ORIGINAL_COLOR.mix(0.7).filled();
    let trimmed_style = TRIMMED_COLOR.mix(0.7).filled();

    chart
        .draw_series(panel.original.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new([(x - BAR_WIDTH, 0.0), (x, v)], original_style)
        }))
        .map_err(draw_err)?
        .label(format!("Original {}", panel.metric))
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], original_style));

    chart
        .draw_series(panel.trimmed.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new([(x, 0.0), (x + BAR_WIDTH, v)], trimmed_style)
        }))
        .map_err(draw_err)?
        .label(format!("Trimmed {}", panel.metric))
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], trimmed_style));

    let value_style = TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let value_labels = panel
        .original
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64 - BAR_WIDTH / 2.0, v))
        .chain(
            panel
                .trimmed
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64 + BAR_WIDTH / 2.0, v)),
        )
        .map(|(x, v)| Text::new(format!("{v:.2}"), (x, v + label_pad), value_style.clone()));
    chart.draw_series(value_labels).map_err(draw_err)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

fn draw_err(e: impl std::fmt::Display) -> AppError {
    AppError::new(2, format!("Failed to draw comparison plot: {e}"))
}
