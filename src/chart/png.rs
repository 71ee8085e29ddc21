use std::path::Path;

use plotters::prelude::*;

use crate::error::AppResult;

use super::config::{QPS_DATASET_LABEL, TOKENS_DATASET_LABEL};
use super::series::ChartSeries;

const QPS_RGB: RGBColor = RGBColor(0x21, 0x96, 0xf3);
const TOKENS_RGB: RGBColor = RGBColor(0x4c, 0xaf, 0x50);
const LEGEND_SWATCH_PX: i32 = 20;

/// Renders the QPS / tokens-per-second chart as a static PNG.
///
/// X positions are the series indices labelled with their concurrency, so
/// duplicate levels stay distinct points. Empty series produce no file.
///
/// # Errors
///
/// Returns an error when the bitmap cannot be drawn or written.
pub fn plot_throughput_chart(series: &ChartSeries, path: &Path) -> AppResult<()> {
    if series.is_empty() {
        return Ok(());
    }

    let points = series.len();
    let qps_max = axis_ceiling(&series.primary_series);
    let tokens_max = axis_ceiling(&series.secondary_series);

    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Throughput by Concurrency", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0usize..points, 0f64..qps_max)?
        .set_secondary_coord(0usize..points, 0f64..tokens_max);

    let label_for = |idx: &usize| {
        series
            .categories
            .get(*idx)
            .map_or_else(String::new, u32::to_string)
    };

    chart
        .configure_mesh()
        .x_desc("Concurrency Level")
        .y_desc("QPS")
        .x_labels(points)
        .x_label_formatter(&label_for)
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc(TOKENS_DATASET_LABEL)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            series.primary_series.iter().copied().enumerate(),
            &QPS_RGB,
        ))?
        .label(QPS_DATASET_LABEL)
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x.saturating_add(LEGEND_SWATCH_PX), y)], QPS_RGB)
        });

    chart
        .draw_secondary_series(LineSeries::new(
            series.secondary_series.iter().copied().enumerate(),
            &TOKENS_RGB,
        ))?
        .label(TOKENS_DATASET_LABEL)
        .legend(|(x, y)| {
            PathElement::new(
                vec![(x, y), (x.saturating_add(LEGEND_SWATCH_PX), y)],
                TOKENS_RGB,
            )
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

fn axis_ceiling(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}
