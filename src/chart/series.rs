use crate::error::ReportError;
use crate::model::{BenchmarkResult, Sample, validate};

/// Index-aligned chart columns: one entry per benchmark result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub categories: Vec<u32>,
    pub primary_series: Vec<f64>,
    pub secondary_series: Vec<f64>,
}

/// Projects results into chart columns without sorting, filtering, or
/// merging duplicate concurrency levels.
///
/// # Errors
///
/// Returns [`ReportError::MalformedInput`] when a result lacks a required
/// metric.
pub fn build_series(results: &[BenchmarkResult]) -> Result<ChartSeries, ReportError> {
    let samples = validate(results)?;
    Ok(ChartSeries::from_samples(&samples))
}

impl ChartSeries {
    #[must_use]
    pub fn from_samples(samples: &[Sample<'_>]) -> Self {
        let mut series = ChartSeries {
            categories: Vec::with_capacity(samples.len()),
            primary_series: Vec::with_capacity(samples.len()),
            secondary_series: Vec::with_capacity(samples.len()),
        };
        for sample in samples {
            series.categories.push(sample.concurrency);
            series.primary_series.push(sample.qps);
            series.secondary_series.push(sample.tokens_per_second);
        }
        series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// QPS display labels (2 decimals).
    #[must_use]
    pub fn primary_labels(&self) -> Vec<String> {
        self.primary_series.iter().copied().map(format_qps).collect()
    }

    /// Token throughput display labels (1 decimal).
    #[must_use]
    pub fn secondary_labels(&self) -> Vec<String> {
        self.secondary_series
            .iter()
            .copied()
            .map(format_tokens)
            .collect()
    }
}

pub(crate) const QPS_DECIMALS: u8 = 2;
pub(crate) const TOKENS_DECIMALS: u8 = 1;

#[must_use]
pub fn format_qps(value: f64) -> String {
    format_fixed(value, QPS_DECIMALS)
}

#[must_use]
pub fn format_tokens(value: f64) -> String {
    format_fixed(value, TOKENS_DECIMALS)
}

/// Fixed-point formatting with ties rounded away from zero, so labels match
/// the browser's `toFixed` output for the same value.
pub(crate) fn format_fixed(value: f64, decimals: u8) -> String {
    let scale = 10_f64.powi(i32::from(decimals));
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", usize::from(decimals), rounded)
}
