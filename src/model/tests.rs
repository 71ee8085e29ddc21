use super::{BenchmarkResult, Comparison, Metrics, validate};
use crate::error::ReportError;

fn result(concurrency: u32, qps: Option<f64>, tokens: Option<f64>) -> BenchmarkResult {
    BenchmarkResult {
        concurrency,
        metrics: Some(Metrics {
            qps,
            tokens_per_second: tokens,
            ..Metrics::default()
        }),
    }
}

#[test]
fn parse_wrapped_comparison() -> Result<(), String> {
    let payload = r#"{
        "test_results": [
            {"concurrency": 1, "metrics": {"qps": 10.456, "tokens_per_second": 100.25, "average_latency": 120}},
            {"concurrency": 5, "metrics": {"qps": 40.1, "tokens_per_second": 390.0}}
        ]
    }"#;
    let comparison =
        Comparison::from_json(payload).map_err(|err| format!("parse failed: {}", err))?;
    if comparison.len() != 2 {
        return Err(format!("Unexpected len: {}", comparison.len()));
    }
    let first = comparison
        .test_results
        .first()
        .and_then(|result| result.metrics.as_ref())
        .ok_or("Missing first metrics")?;
    if first.average_latency_ms != 120 {
        return Err(format!("Unexpected latency: {}", first.average_latency_ms));
    }
    if first.total_requests != 0 {
        return Err("Expected defaulted total_requests".to_owned());
    }
    Ok(())
}

#[test]
fn parse_bare_array_with_camel_case_tokens() -> Result<(), String> {
    let payload = r#"[{"concurrency": 2, "metrics": {"qps": 3.5, "tokensPerSecond": 42.0}}]"#;
    let comparison =
        Comparison::from_json(payload).map_err(|err| format!("parse failed: {}", err))?;
    let samples = validate(&comparison.test_results).map_err(|err| err.to_string())?;
    let sample = samples.first().ok_or("Missing sample")?;
    if sample.concurrency != 2 || sample.tokens_per_second.to_bits() != 42.0_f64.to_bits() {
        return Err(format!("Unexpected sample: {:?}", sample));
    }
    Ok(())
}

#[test]
fn validate_reports_missing_metrics_block() -> Result<(), String> {
    let results = vec![
        result(1, Some(1.0), Some(2.0)),
        BenchmarkResult {
            concurrency: 2,
            metrics: None,
        },
    ];
    match validate(&results) {
        Err(ReportError::MalformedInput { index: 1, field }) if field == "metrics" => Ok(()),
        other => Err(format!("Unexpected outcome: {:?}", other.map(|s| s.len()))),
    }
}

#[test]
fn validate_reports_first_missing_field() -> Result<(), String> {
    let results = vec![
        result(1, Some(1.0), Some(2.0)),
        result(2, Some(1.5), None),
        result(3, None, None),
    ];
    match validate(&results) {
        Err(ReportError::MalformedInput { index: 1, field }) if field == "tokens_per_second" => {
            Ok(())
        }
        other => Err(format!("Unexpected outcome: {:?}", other.map(|s| s.len()))),
    }
}

#[test]
fn error_rate_handles_zero_requests() -> Result<(), String> {
    let idle = Metrics::default();
    if idle.error_rate() > 0.0 {
        return Err("Expected zero error rate".to_owned());
    }
    let busy = Metrics {
        total_requests: 200,
        failed_requests: 5,
        ..Metrics::default()
    };
    if (busy.error_rate() - 2.5).abs() > 1e-9 {
        return Err(format!("Unexpected error rate: {}", busy.error_rate()));
    }
    Ok(())
}
