use serde::Serialize;

use crate::model::Sample;

pub const DEFAULT_GRADIENT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_LATENCY_RATIO_THRESHOLD: f64 = 1.0;
pub const DEFAULT_STATISTICAL_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    GradientBased,
    StatisticalBased,
    LatencyBased,
    FirstTokenLatencyBased,
}

/// Snapshot of one concurrency level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    pub concurrency: u32,
    pub qps: f64,
    pub tokens_per_second: f64,
    pub average_latency_ms: u64,
}

impl Level {
    #[must_use]
    pub const fn of(sample: &Sample<'_>) -> Self {
        Self::with_latency(sample, sample.metrics.average_latency_ms)
    }

    #[must_use]
    pub const fn with_latency(sample: &Sample<'_>, average_latency_ms: u64) -> Self {
        Self {
            concurrency: sample.concurrency,
            qps: sample.qps,
            tokens_per_second: sample.tokens_per_second,
            average_latency_ms,
        }
    }
}

/// Outcome of a detector run.
///
/// When nothing is detected `level` is the highest concurrency tested and
/// `is_bottleneck` is false. `level` is `None` only for an empty sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bottleneck {
    pub algorithm: Algorithm,
    pub is_bottleneck: bool,
    pub level: Option<Level>,
}

impl Bottleneck {
    const fn none(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            is_bottleneck: false,
            level: None,
        }
    }

    const fn found(algorithm: Algorithm, level: Level) -> Self {
        Self {
            algorithm,
            is_bottleneck: true,
            level: Some(level),
        }
    }

    const fn last(algorithm: Algorithm, level: Option<Level>) -> Self {
        Self {
            algorithm,
            is_bottleneck: false,
            level,
        }
    }

    /// Concurrency of the detected bottleneck, if any.
    #[must_use]
    pub fn concurrency(&self) -> Option<u32> {
        self.level
            .filter(|_| self.is_bottleneck)
            .map(|level| level.concurrency)
    }
}

pub trait BottleneckDetector {
    fn detect(&self, samples: &[Sample<'_>]) -> Bottleneck;
}

/// Flags the level after which QPS gains per added client fall below
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDetector {
    pub threshold: f64,
}

impl Default for GradientDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

impl BottleneckDetector for GradientDetector {
    fn detect(&self, samples: &[Sample<'_>]) -> Bottleneck {
        let sorted = by_concurrency(samples);
        for pair in sorted.windows(2) {
            let [prev, curr] = pair else {
                continue;
            };
            if prev.metrics.successful_requests == 0 || curr.metrics.successful_requests == 0 {
                continue;
            }
            let step = f64::from(curr.concurrency) - f64::from(prev.concurrency);
            if step <= 0.0 {
                continue;
            }
            let gradient = (curr.qps - prev.qps) / step;
            if gradient < self.threshold {
                return Bottleneck::found(Algorithm::GradientBased, Level::of(prev));
            }
        }
        Bottleneck::last(
            Algorithm::GradientBased,
            sorted.last().map(|sample| Level::of(sample)),
        )
    }
}

/// Flags the start of the first window of consecutive levels whose QPS
/// coefficient of variation drops below `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticalDetector {
    pub window: usize,
    pub threshold: f64,
}

impl StatisticalDetector {
    #[must_use]
    pub const fn new(window: usize, threshold: f64) -> Self {
        Self { window, threshold }
    }
}

impl BottleneckDetector for StatisticalDetector {
    fn detect(&self, samples: &[Sample<'_>]) -> Bottleneck {
        if self.window == 0 || samples.len() < self.window {
            return Bottleneck::none(Algorithm::StatisticalBased);
        }
        let sorted = by_concurrency(samples);
        // The window ending at the highest level is never evaluated.
        let evaluated = sorted.len().saturating_sub(self.window);
        for window in sorted.windows(self.window).take(evaluated) {
            let Some(cv) = coefficient_of_variation(window.iter().map(|sample| sample.qps)) else {
                continue;
            };
            if cv < self.threshold
                && let Some(start) = window.first()
            {
                return Bottleneck::found(Algorithm::StatisticalBased, Level::of(start));
            }
        }
        Bottleneck::last(
            Algorithm::StatisticalBased,
            sorted.last().map(|sample| Level::of(sample)),
        )
    }
}

/// Flags the level after which relative latency growth outpaces relative
/// concurrency growth by more than `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyDetector {
    pub threshold: f64,
    pub first_token: bool,
}

impl LatencyDetector {
    #[must_use]
    pub const fn end_to_end(threshold: f64) -> Self {
        Self {
            threshold,
            first_token: false,
        }
    }

    #[must_use]
    pub const fn first_token(threshold: f64) -> Self {
        Self {
            threshold,
            first_token: true,
        }
    }

    const fn algorithm(&self) -> Algorithm {
        if self.first_token {
            Algorithm::FirstTokenLatencyBased
        } else {
            Algorithm::LatencyBased
        }
    }

    const fn latency_ms(&self, sample: &Sample<'_>) -> u64 {
        if self.first_token {
            sample.metrics.average_first_token_latency_ms
        } else {
            sample.metrics.average_latency_ms
        }
    }

    const fn level(&self, sample: &Sample<'_>) -> Level {
        Level::with_latency(sample, self.latency_ms(sample))
    }
}

impl Default for LatencyDetector {
    fn default() -> Self {
        Self::end_to_end(DEFAULT_LATENCY_RATIO_THRESHOLD)
    }
}

impl BottleneckDetector for LatencyDetector {
    fn detect(&self, samples: &[Sample<'_>]) -> Bottleneck {
        let sorted = by_concurrency(samples);
        for pair in sorted.windows(2) {
            let [prev, curr] = pair else {
                continue;
            };
            if prev.metrics.successful_requests == 0 || curr.metrics.successful_requests == 0 {
                continue;
            }
            let prev_latency = self.latency_ms(prev);
            let curr_latency = self.latency_ms(curr);
            if prev_latency == 0 || curr_latency == 0 || prev.concurrency == 0 {
                continue;
            }
            let step = f64::from(curr.concurrency) - f64::from(prev.concurrency);
            if step <= 0.0 {
                continue;
            }
            let prev_latency = u64_to_f64(prev_latency);
            let latency_growth = (u64_to_f64(curr_latency) - prev_latency) / prev_latency;
            let concurrency_growth = step / f64::from(prev.concurrency);
            if latency_growth / concurrency_growth > self.threshold {
                return Bottleneck::found(self.algorithm(), self.level(prev));
            }
        }
        Bottleneck::last(
            self.algorithm(),
            sorted.last().map(|sample| self.level(sample)),
        )
    }
}

fn by_concurrency<'slice, 'data>(samples: &'slice [Sample<'data>]) -> Vec<&'slice Sample<'data>> {
    let mut sorted: Vec<&'slice Sample<'data>> = samples.iter().collect();
    sorted.sort_by_key(|sample| sample.concurrency);
    sorted
}

fn coefficient_of_variation(values: impl Iterator<Item = f64> + Clone) -> Option<f64> {
    let (count, sum) = values
        .clone()
        .fold((0_u32, 0.0_f64), |(count, sum), value| {
            (count.saturating_add(1), sum + value)
        });
    if count == 0 {
        return None;
    }
    let count = f64::from(count);
    let mean = sum / count;
    if mean == 0.0 {
        return None;
    }
    let variance = values.map(|value| (value - mean).powi(2)).sum::<f64>() / count;
    Some(variance.sqrt() / mean)
}

const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}
