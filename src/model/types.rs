use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Results of one load-test sweep, in the order the levels were executed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub test_results: Vec<BenchmarkResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub concurrency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

/// Metrics of a single concurrency level.
///
/// Durations are whole milliseconds, matching the upstream JSON encoding.
/// Only `qps` and `tokens_per_second` are required by the chart; every other
/// field defaults to zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Percentage of successful requests, 0-100.
    pub success_rate: f64,

    #[serde(rename = "total_duration")]
    pub total_duration_ms: u64,
    #[serde(rename = "average_latency")]
    pub average_latency_ms: u64,
    #[serde(rename = "latency_p50")]
    pub latency_p50_ms: u64,
    #[serde(rename = "latency_p90")]
    pub latency_p90_ms: u64,
    #[serde(rename = "latency_p99")]
    pub latency_p99_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps: Option<f64>,
    pub total_tokens: u64,
    #[serde(alias = "tokensPerSecond", skip_serializing_if = "Option::is_none")]
    pub tokens_per_second: Option<f64>,

    pub average_request_tokens: f64,
    pub average_response_tokens: f64,

    #[serde(rename = "average_first_token_latency")]
    pub average_first_token_latency_ms: u64,
    #[serde(rename = "first_token_latency_p50")]
    pub first_token_latency_p50_ms: u64,
    #[serde(rename = "first_token_latency_p90")]
    pub first_token_latency_p90_ms: u64,
    #[serde(rename = "first_token_latency_p99")]
    pub first_token_latency_p99_ms: u64,

    pub error_counts: BTreeMap<String, u64>,
    pub error_type_counts: BTreeMap<String, u64>,
}

impl Metrics {
    /// Failed requests as a percentage of all requests.
    #[must_use]
    pub fn error_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.failed_requests as f64 * 100.0 / self.total_requests as f64
    }
}

impl Comparison {
    /// Parses the upstream comparison document.
    ///
    /// Accepts both `{"test_results": [...]}` and a bare array of results.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not valid JSON for either shape.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped(Comparison),
            Bare(Vec<BenchmarkResult>),
        }

        let shape: Shape = serde_json::from_str(payload)?;
        Ok(match shape {
            Shape::Wrapped(comparison) => comparison,
            Shape::Bare(test_results) => Comparison { test_results },
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.test_results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_results.is_empty()
    }
}
