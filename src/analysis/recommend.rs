use std::num::NonZeroUsize;

use serde::Serialize;

use crate::model::Sample;

use super::best::{best_latency, best_qps, best_tokens_throughput};
use super::bottleneck::{
    Bottleneck, BottleneckDetector, DEFAULT_GRADIENT_THRESHOLD, DEFAULT_LATENCY_RATIO_THRESHOLD,
    DEFAULT_STATISTICAL_THRESHOLD, GradientDetector, LatencyDetector, Level, StatisticalDetector,
};

/// How the QPS bottleneck is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QpsMethod {
    #[default]
    Gradient,
    Statistical { window: NonZeroUsize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub qps_method: QpsMethod,
    /// Minimum QPS gain per added client for [`QpsMethod::Gradient`], or the
    /// coefficient of variation for [`QpsMethod::Statistical`].
    pub qps: f64,
    pub latency_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            qps_method: QpsMethod::Gradient,
            qps: DEFAULT_GRADIENT_THRESHOLD,
            latency_ratio: DEFAULT_LATENCY_RATIO_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Thresholds for the statistical QPS method with its default variation
    /// cutoff.
    #[must_use]
    pub fn statistical(window: NonZeroUsize) -> Self {
        Self {
            qps_method: QpsMethod::Statistical { window },
            qps: DEFAULT_STATISTICAL_THRESHOLD,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn detect_qps_bottleneck(&self, samples: &[Sample<'_>]) -> Bottleneck {
        match self.qps_method {
            QpsMethod::Gradient => GradientDetector {
                threshold: self.qps,
            }
            .detect(samples),
            QpsMethod::Statistical { window } => {
                StatisticalDetector::new(window.get(), self.qps).detect(samples)
            }
        }
    }

    #[must_use]
    pub fn detect_latency_bottleneck(&self, samples: &[Sample<'_>]) -> Bottleneck {
        LatencyDetector::end_to_end(self.latency_ratio).detect(samples)
    }
}

/// Why a concurrency level was recommended. Each reason has a phrase in the
/// report dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RecommendationReason {
    SingleLevel,
    QpsBottleneck,
    /// The level served so few requests that the plateau may be an artifact
    /// of a short run.
    QpsBottleneckUnconfirmed { total_requests: u64 },
    LatencyBottleneck,
    MaximizesBoth,
    Balanced,
    MaximumQps,
}

impl RecommendationReason {
    #[must_use]
    pub const fn phrase_key(self) -> &'static str {
        match self {
            RecommendationReason::SingleLevel => "reasonSingleLevel",
            RecommendationReason::QpsBottleneck => "reasonQpsBottleneck",
            RecommendationReason::QpsBottleneckUnconfirmed { .. } => {
                "reasonQpsBottleneckUnconfirmed"
            }
            RecommendationReason::LatencyBottleneck => "reasonLatencyBottleneck",
            RecommendationReason::MaximizesBoth => "reasonMaximizesBoth",
            RecommendationReason::Balanced => "reasonBalanced",
            RecommendationReason::MaximumQps => "reasonMaximumQps",
        }
    }

    /// Key of the markup-free phrase used on the console.
    #[must_use]
    pub const fn console_key(self) -> &'static str {
        match self {
            RecommendationReason::QpsBottleneckUnconfirmed { .. } => {
                "reasonQpsBottleneckUnconfirmedPlain"
            }
            RecommendationReason::SingleLevel
            | RecommendationReason::QpsBottleneck
            | RecommendationReason::LatencyBottleneck
            | RecommendationReason::MaximizesBoth
            | RecommendationReason::Balanced
            | RecommendationReason::MaximumQps => self.phrase_key(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub level: Level,
    pub reason: RecommendationReason,
}

/// Derives the concurrency level to recommend from the QPS and latency
/// bottlenecks and the best levels of the sweep.
///
/// Returns `None` for an empty sweep.
#[must_use]
pub fn recommend_concurrency(
    samples: &[Sample<'_>],
    thresholds: &Thresholds,
) -> Option<Recommendation> {
    let top = best_qps(samples)?;
    if let [only] = samples {
        return Some(Recommendation {
            level: Level::of(only),
            reason: RecommendationReason::SingleLevel,
        });
    }

    let qps_bottleneck = detected(thresholds.detect_qps_bottleneck(samples));
    let latency_bottleneck = detected(thresholds.detect_latency_bottleneck(samples));

    let recommendation = match (qps_bottleneck, latency_bottleneck) {
        (Some(qps), Some(latency)) if qps.concurrency <= latency.concurrency => Recommendation {
            level: qps,
            reason: RecommendationReason::QpsBottleneck,
        },
        (Some(_), Some(latency)) | (None, Some(latency)) => Recommendation {
            level: latency,
            reason: RecommendationReason::LatencyBottleneck,
        },
        (Some(qps), None) => Recommendation {
            level: qps,
            reason: qps_only_reason(samples, qps.concurrency),
        },
        (None, None) => Recommendation {
            level: Level::of(&top),
            reason: unconstrained_reason(samples, &top),
        },
    };
    Some(recommendation)
}

fn detected(bottleneck: Bottleneck) -> Option<Level> {
    bottleneck.level.filter(|_| bottleneck.is_bottleneck)
}

fn qps_only_reason(samples: &[Sample<'_>], concurrency: u32) -> RecommendationReason {
    let total_requests = samples
        .iter()
        .find(|sample| sample.concurrency == concurrency)
        .map_or(0, |sample| sample.metrics.total_requests);
    if total_requests > 0 && total_requests <= u64::from(concurrency).saturating_mul(2) {
        RecommendationReason::QpsBottleneckUnconfirmed { total_requests }
    } else {
        RecommendationReason::QpsBottleneck
    }
}

fn unconstrained_reason(samples: &[Sample<'_>], top: &Sample<'_>) -> RecommendationReason {
    let tokens = best_tokens_throughput(samples).map(|sample| sample.concurrency);
    if tokens == Some(top.concurrency) {
        return RecommendationReason::MaximizesBoth;
    }
    let balanced = best_latency(samples)
        .zip(tokens)
        .is_some_and(|(latency, tokens)| {
            latency.concurrency <= top.concurrency && latency.concurrency <= tokens
        });
    if balanced {
        RecommendationReason::Balanced
    } else {
        RecommendationReason::MaximumQps
    }
}
