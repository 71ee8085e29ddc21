use std::cmp::Ordering;

use crate::model::Sample;

/// Highest QPS; ties go to the higher concurrency.
#[must_use]
pub fn best_qps<'data>(samples: &[Sample<'data>]) -> Option<Sample<'data>> {
    select(samples.iter().copied(), |sample| sample.qps, Ordering::Greater)
}

/// Highest token throughput; ties go to the higher concurrency.
#[must_use]
pub fn best_tokens_throughput<'data>(samples: &[Sample<'data>]) -> Option<Sample<'data>> {
    select(
        samples.iter().copied(),
        |sample| sample.tokens_per_second,
        Ordering::Greater,
    )
}

#[must_use]
pub fn best_success_rate<'data>(samples: &[Sample<'data>]) -> Option<Sample<'data>> {
    select(
        samples.iter().copied(),
        |sample| sample.metrics.success_rate,
        Ordering::Greater,
    )
}

/// Lowest non-zero average end-to-end latency.
#[must_use]
pub fn best_latency<'data>(samples: &[Sample<'data>]) -> Option<Sample<'data>> {
    select(
        samples
            .iter()
            .copied()
            .filter(|sample| sample.metrics.average_latency_ms > 0),
        |sample| sample.metrics.average_latency_ms,
        Ordering::Less,
    )
}

/// Lowest non-zero average first-token latency.
#[must_use]
pub fn best_first_token_latency<'data>(samples: &[Sample<'data>]) -> Option<Sample<'data>> {
    select(
        samples
            .iter()
            .copied()
            .filter(|sample| sample.metrics.average_first_token_latency_ms > 0),
        |sample| sample.metrics.average_first_token_latency_ms,
        Ordering::Less,
    )
}

fn select<'data, I, K, F>(samples: I, key: F, wanted: Ordering) -> Option<Sample<'data>>
where
    I: Iterator<Item = Sample<'data>>,
    K: PartialOrd,
    F: Fn(&Sample<'data>) -> K,
{
    samples.fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) => {
            let beats = match key(&candidate).partial_cmp(&key(&current)) {
                Some(Ordering::Equal) => candidate.concurrency > current.concurrency,
                Some(order) => order == wanted,
                None => false,
            };
            Some(if beats { candidate } else { current })
        }
    })
}
