//! Summary analysis of a concurrency sweep.
//!
//! Picks the best level per metric, looks for the level where QPS stops
//! scaling or latency starts outgrowing concurrency, and derives the
//! concurrency the report recommends.
mod best;
mod bottleneck;
mod recommend;

#[cfg(test)]
mod tests;

pub use best::{
    best_first_token_latency, best_latency, best_qps, best_success_rate, best_tokens_throughput,
};
pub use bottleneck::{
    Algorithm, Bottleneck, BottleneckDetector, DEFAULT_GRADIENT_THRESHOLD,
    DEFAULT_LATENCY_RATIO_THRESHOLD, DEFAULT_STATISTICAL_THRESHOLD, GradientDetector,
    LatencyDetector, Level, StatisticalDetector,
};
pub use recommend::{
    QpsMethod, Recommendation, RecommendationReason, Thresholds, recommend_concurrency,
};

use serde::Serialize;

use crate::model::Sample;

/// Everything the report summary shows about a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub best_qps: Option<Level>,
    pub best_tokens_throughput: Option<Level>,
    pub best_success_rate: Option<Level>,
    pub best_latency: Option<Level>,
    pub best_first_token_latency: Option<Level>,
    pub qps_bottleneck: Bottleneck,
    pub latency_bottleneck: Bottleneck,
    pub first_token_latency_bottleneck: Bottleneck,
    pub recommendation: Option<Recommendation>,
}

impl Analysis {
    #[must_use]
    pub fn run(samples: &[Sample<'_>], thresholds: &Thresholds) -> Self {
        let first_token = LatencyDetector::first_token(thresholds.latency_ratio);

        Self {
            best_qps: best_qps(samples).map(|sample| Level::of(&sample)),
            best_tokens_throughput: best_tokens_throughput(samples)
                .map(|sample| Level::of(&sample)),
            best_success_rate: best_success_rate(samples).map(|sample| Level::of(&sample)),
            best_latency: best_latency(samples).map(|sample| Level::of(&sample)),
            best_first_token_latency: best_first_token_latency(samples).map(|sample| {
                Level::with_latency(&sample, sample.metrics.average_first_token_latency_ms)
            }),
            qps_bottleneck: thresholds.detect_qps_bottleneck(samples),
            latency_bottleneck: thresholds.detect_latency_bottleneck(samples),
            first_token_latency_bottleneck: first_token.detect(samples),
            recommendation: recommend_concurrency(samples, thresholds),
        }
    }
}
