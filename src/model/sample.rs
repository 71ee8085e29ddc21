use crate::error::ReportError;

use super::types::{BenchmarkResult, Metrics};

/// A benchmark result whose chart metrics are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'data> {
    pub index: usize,
    pub concurrency: u32,
    pub qps: f64,
    pub tokens_per_second: f64,
    pub metrics: &'data Metrics,
}

/// Resolves the required metrics of every result, preserving input order.
///
/// # Errors
///
/// Returns [`ReportError::MalformedInput`] naming the first result that lacks
/// its metrics block, `qps`, or `tokens_per_second`.
pub fn validate(results: &[BenchmarkResult]) -> Result<Vec<Sample<'_>>, ReportError> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let metrics = result.metrics.as_ref().ok_or(ReportError::MalformedInput {
                index,
                field: "metrics",
            })?;
            let qps = metrics.qps.ok_or(ReportError::MalformedInput {
                index,
                field: "qps",
            })?;
            let tokens_per_second =
                metrics
                    .tokens_per_second
                    .ok_or(ReportError::MalformedInput {
                        index,
                        field: "tokens_per_second",
                    })?;
            Ok(Sample {
                index,
                concurrency: result.concurrency,
                qps,
                tokens_per_second,
                metrics,
            })
        })
        .collect()
}
