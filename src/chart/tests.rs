use proptest::prelude::*;
use tempfile::tempdir;

use super::{
    AxisPosition, ChartSeries, InteractionMode, LegendPosition, TooltipFormat, build_series,
    configure_chart, format_qps, format_tokens, plot_throughput_chart,
};
use crate::error::{AppError, AppResult, ReportError};
use crate::model::{BenchmarkResult, Metrics};

fn result(concurrency: u32, qps: f64, tokens: f64) -> BenchmarkResult {
    BenchmarkResult {
        concurrency,
        metrics: Some(Metrics {
            qps: Some(qps),
            tokens_per_second: Some(tokens),
            ..Metrics::default()
        }),
    }
}

fn same_values(left: &[f64], right: &[f64]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| a.to_bits() == b.to_bits())
}

#[test]
fn build_series_example_scenario() -> Result<(), ReportError> {
    let results = vec![result(1, 10.456, 100.25), result(5, 40.1, 390.0)];
    let series = build_series(&results)?;

    if series.categories != vec![1, 5] {
        return Err(format!("Unexpected categories: {:?}", series.categories).into());
    }
    if !same_values(&series.primary_series, &[10.456, 40.1]) {
        return Err(format!("Unexpected primary: {:?}", series.primary_series).into());
    }
    if !same_values(&series.secondary_series, &[100.25, 390.0]) {
        return Err(format!("Unexpected secondary: {:?}", series.secondary_series).into());
    }
    if series.primary_labels() != vec!["10.46".to_owned(), "40.10".to_owned()] {
        return Err(format!("Unexpected QPS labels: {:?}", series.primary_labels()).into());
    }
    if series.secondary_labels() != vec!["100.3".to_owned(), "390.0".to_owned()] {
        return Err(format!("Unexpected token labels: {:?}", series.secondary_labels()).into());
    }
    Ok(())
}

#[test]
fn build_series_empty_input_configures_empty_chart() -> Result<(), ReportError> {
    let series = build_series(&[])?;
    if !series.is_empty()
        || !series.primary_series.is_empty()
        || !series.secondary_series.is_empty()
    {
        return Err("Expected empty series".into());
    }
    let chart = configure_chart(&series);
    if !chart.data.labels.is_empty() {
        return Err("Expected no labels".into());
    }
    if chart.data.datasets.iter().any(|dataset| !dataset.data.is_empty()) {
        return Err("Expected empty datasets".into());
    }
    Ok(())
}

#[test]
fn build_series_keeps_duplicates_and_input_order() -> Result<(), ReportError> {
    let results = vec![
        result(8, 30.0, 300.0),
        result(2, 12.0, 120.0),
        result(8, 31.0, 310.0),
    ];
    let series = build_series(&results)?;
    if series.categories != vec![8, 2, 8] {
        return Err(format!("Unexpected categories: {:?}", series.categories).into());
    }
    if !same_values(&series.primary_series, &[30.0, 12.0, 31.0]) {
        return Err("Unexpected primary order".into());
    }
    Ok(())
}

#[test]
fn build_series_rejects_missing_metric() -> Result<(), String> {
    let mut broken = result(4, 1.0, 2.0);
    if let Some(metrics) = broken.metrics.as_mut() {
        metrics.qps = None;
    }
    let results = vec![result(1, 1.0, 2.0), result(2, 1.0, 2.0), broken];
    match build_series(&results) {
        Err(ReportError::MalformedInput { index: 2, field: "qps" }) => Ok(()),
        other => Err(format!("Unexpected outcome: {:?}", other)),
    }
}

#[test]
fn configure_chart_binds_series_to_separate_axes() -> Result<(), String> {
    let series = ChartSeries {
        categories: vec![1, 2],
        primary_series: vec![5.0, 9.0],
        secondary_series: vec![50.0, 90.0],
    };
    let chart = configure_chart(&series);

    let [qps, tokens] = chart.data.datasets.as_slice() else {
        return Err("Expected two datasets".to_owned());
    };
    if qps.y_axis_id != "y" || !same_values(&qps.data, &series.primary_series) {
        return Err("QPS dataset not bound to left axis".to_owned());
    }
    if tokens.y_axis_id != "y1" || !same_values(&tokens.data, &series.secondary_series) {
        return Err("Tokens dataset not bound to right axis".to_owned());
    }

    let scales = &chart.options.scales;
    if scales.y.position != Some(AxisPosition::Left) || scales.y.grid.is_some() {
        return Err("Unexpected left axis".to_owned());
    }
    if scales.y1.position != Some(AxisPosition::Right) {
        return Err("Unexpected right axis position".to_owned());
    }
    if scales.y1.grid.is_none_or(|grid| grid.draw_on_chart_area) {
        return Err("Right axis gridlines should be suppressed".to_owned());
    }
    if scales.x.title.text != "Concurrency Level" {
        return Err(format!("Unexpected x title: {}", scales.x.title.text));
    }
    if chart.options.interaction.mode != InteractionMode::Index
        || chart.options.interaction.intersect
    {
        return Err("Expected shared-index tooltip".to_owned());
    }
    if chart.options.plugins.legend.position != LegendPosition::Top {
        return Err("Expected legend on top".to_owned());
    }
    Ok(())
}

#[test]
fn configure_chart_serializes_to_chartjs_shape() -> Result<(), String> {
    let series = ChartSeries {
        categories: vec![1],
        primary_series: vec![1.5],
        secondary_series: vec![2.5],
    };
    let value = serde_json::to_value(configure_chart(&series))
        .map_err(|err| format!("serialize failed: {}", err))?;

    let checks = [
        (value["type"] == "line", "Expected line chart"),
        (
            value["data"]["datasets"][1]["yAxisID"] == "y1",
            "Expected yAxisID key",
        ),
        (
            value["options"]["scales"]["y1"]["grid"]["drawOnChartArea"] == false,
            "Expected drawOnChartArea false",
        ),
        (
            value["options"]["interaction"]["mode"] == "index",
            "Expected index interaction",
        ),
        (
            value["options"]["maintainAspectRatio"] == false,
            "Expected maintainAspectRatio false",
        ),
        (
            value["options"]["scales"]["x"].get("position").is_none(),
            "Expected no x position",
        ),
        (value.get("tooltip").is_none(), "Tooltip must not serialize"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn tooltip_uses_fixed_precision_for_every_series() -> Result<(), String> {
    let tooltip = TooltipFormat::default();
    let cases = [
        (tooltip.label("Tokens/sec", Some(100.25)), "Tokens/sec: 100.25"),
        (tooltip.label("QPS", Some(40.1)), "QPS: 40.10"),
        (tooltip.label("", Some(7.129)), "7.13"),
        (tooltip.label("QPS", None), "QPS: "),
    ];
    for (actual, expected) in cases {
        if actual != expected {
            return Err(format!("Expected '{}', got '{}'", expected, actual));
        }
    }
    Ok(())
}

#[test]
fn display_formatting_rounds_half_away_from_zero() -> Result<(), String> {
    let cases = [
        (format_qps(10.456), "10.46"),
        (format_qps(40.1), "40.10"),
        (format_qps(0.0), "0.00"),
        (format_tokens(100.25), "100.3"),
        (format_tokens(390.0), "390.0"),
    ];
    for (actual, expected) in cases {
        if actual != expected {
            return Err(format!("Expected '{}', got '{}'", expected, actual));
        }
    }
    Ok(())
}

#[test]
fn plot_throughput_chart_skips_empty_series() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("throughput.png");
    plot_throughput_chart(&ChartSeries::default(), &path)?;
    if path.exists() {
        return Err(AppError::report("Expected no file for empty series"));
    }
    Ok(())
}

#[test]
fn plot_throughput_chart_writes_png() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("throughput.png");
    let series = build_series(&[result(1, 10.0, 100.0), result(4, 32.0, 330.0)])?;
    plot_throughput_chart(&series, &path)?;
    if std::fs::metadata(&path).is_err() {
        return Err(AppError::report("Missing throughput chart output"));
    }
    Ok(())
}

proptest! {
    #[test]
    fn build_series_is_index_aligned(
        rows in proptest::collection::vec((1u32..512, 0.0f64..1e6, 0.0f64..1e7), 0..64)
    ) {
        let results: Vec<BenchmarkResult> = rows
            .iter()
            .map(|(concurrency, qps, tokens)| result(*concurrency, *qps, *tokens))
            .collect();
        let series = build_series(&results);
        prop_assert!(series.is_ok());
        let series = series.unwrap_or_default();
        prop_assert_eq!(series.categories.len(), results.len());
        prop_assert_eq!(series.primary_series.len(), results.len());
        prop_assert_eq!(series.secondary_series.len(), results.len());
        for (idx, (concurrency, qps, tokens)) in rows.iter().enumerate() {
            prop_assert_eq!(series.categories.get(idx), Some(concurrency));
            prop_assert_eq!(series.primary_series.get(idx).map(|v| v.to_bits()), Some(qps.to_bits()));
            prop_assert_eq!(series.secondary_series.get(idx).map(|v| v.to_bits()), Some(tokens.to_bits()));
        }
    }
}
