use std::num::NonZeroUsize;

use super::{
    Algorithm, Analysis, BottleneckDetector, GradientDetector, LatencyDetector, RecommendationReason,
    StatisticalDetector, Thresholds, best_first_token_latency, best_latency, best_qps,
    best_success_rate, best_tokens_throughput, recommend_concurrency,
};
use crate::error::{AppError, AppResult, ValidationError};
use crate::model::{BenchmarkResult, Metrics, Sample, validate};

struct Level {
    concurrency: u32,
    qps: f64,
    tokens: f64,
    latency_ms: u64,
    successful: u64,
}

const fn level(concurrency: u32, qps: f64, latency_ms: u64) -> Level {
    Level {
        concurrency,
        qps,
        tokens: qps * 10.0,
        latency_ms,
        successful: 100,
    }
}

fn results(levels: &[Level]) -> Vec<BenchmarkResult> {
    levels
        .iter()
        .map(|level| BenchmarkResult {
            concurrency: level.concurrency,
            metrics: Some(Metrics {
                qps: Some(level.qps),
                tokens_per_second: Some(level.tokens),
                average_latency_ms: level.latency_ms,
                successful_requests: level.successful,
                total_requests: level.successful,
                ..Metrics::default()
            }),
        })
        .collect()
}

fn samples(results: &[BenchmarkResult]) -> AppResult<Vec<Sample<'_>>> {
    validate(results).map_err(AppError::report)
}

fn fail(message: &'static str) -> AppError {
    AppError::validation(ValidationError::from(message))
}

fn fail_with(value: String) -> AppError {
    AppError::validation(ValidationError::from(value))
}

fn plateau() -> Vec<BenchmarkResult> {
    results(&[
        level(1, 10.0, 100),
        level(2, 20.0, 95),
        level(3, 25.0, 105),
        level(4, 27.0, 120),
        level(5, 27.5, 150),
    ])
}

#[test]
fn gradient_detector_finds_plateau_with_high_threshold() -> AppResult<()> {
    let data = plateau();
    let samples = samples(&data)?;

    let found = GradientDetector { threshold: 10.0 }.detect(&samples);
    if !found.is_bottleneck || found.concurrency() != Some(2) {
        return Err(fail_with(format!("Unexpected bottleneck: {:?}", found)));
    }
    if found.algorithm != Algorithm::GradientBased {
        return Err(fail("Unexpected algorithm"));
    }
    Ok(())
}

#[test]
fn gradient_detector_reports_last_level_when_still_scaling() -> AppResult<()> {
    let data = plateau();
    let samples = samples(&data)?;

    let result = GradientDetector { threshold: 0.1 }.detect(&samples);
    if result.is_bottleneck {
        return Err(fail_with(format!("Unexpected bottleneck: {:?}", result)));
    }
    if result.level.map(|level| level.concurrency) != Some(5) {
        return Err(fail_with(format!("Expected last level, got {:?}", result)));
    }
    Ok(())
}

#[test]
fn gradient_detector_sorts_and_skips_failed_levels() -> AppResult<()> {
    let mut levels = vec![level(4, 40.0, 100), level(1, 10.0, 100), level(2, 11.0, 100)];
    if let Some(failed) = levels.get_mut(2) {
        failed.successful = 0;
    }
    let data = results(&levels);
    let samples = samples(&data)?;

    let result = GradientDetector::default().detect(&samples);
    if result.is_bottleneck || result.level.map(|level| level.concurrency) != Some(4) {
        return Err(fail_with(format!("Unexpected result: {:?}", result)));
    }
    Ok(())
}

#[test]
fn detectors_handle_empty_and_single_sweeps() -> AppResult<()> {
    let data = results(&[level(1, 10.0, 100)]);
    let single = samples(&data)?;
    let detectors: [&dyn BottleneckDetector; 3] = [
        &GradientDetector::default(),
        &StatisticalDetector::new(3, 0.05),
        &LatencyDetector::default(),
    ];
    for detector in detectors {
        let empty = detector.detect(&[]);
        if empty.is_bottleneck || empty.level.is_some() {
            return Err(fail_with(format!("Empty sweep produced {:?}", empty)));
        }
        if detector.detect(&single).is_bottleneck {
            return Err(fail("Single level reported as bottleneck"));
        }
    }
    Ok(())
}

#[test]
fn statistical_detector_flags_stable_window() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 100),
        level(2, 20.0, 95),
        level(3, 30.0, 105),
        level(4, 31.0, 120),
        level(5, 31.5, 150),
        level(6, 31.8, 180),
    ]);
    let samples = samples(&data)?;

    let detector = StatisticalDetector::new(3, 0.05);
    let result = detector.detect(&samples);
    if result.algorithm != Algorithm::StatisticalBased || result.concurrency() != Some(3) {
        return Err(fail_with(format!("Unexpected result: {:?}", result)));
    }

    let short = detector.detect(samples.get(..2).unwrap_or_default());
    if short.is_bottleneck {
        return Err(fail("Fewer levels than the window cannot be a bottleneck"));
    }
    Ok(())
}

#[test]
fn statistical_detector_skips_window_ending_at_highest_level() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 100),
        level(2, 20.0, 100),
        level(3, 30.0, 100),
        level(4, 30.1, 100),
        level(5, 30.2, 100),
    ]);
    let samples = samples(&data)?;

    let result = StatisticalDetector::new(3, 0.05).detect(&samples);
    if result.is_bottleneck {
        return Err(fail_with(format!(
            "Only the final window is stable, expected none: {:?}",
            result
        )));
    }
    if result.level.map(|level| level.concurrency) != Some(5) {
        return Err(fail_with(format!("Expected last level, got {:?}", result)));
    }
    Ok(())
}

#[test]
fn latency_detector_flags_superlinear_growth() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 100),
        level(2, 18.0, 150),
        level(3, 22.0, 250),
        level(4, 23.0, 400),
        level(5, 23.5, 800),
    ]);
    let samples = samples(&data)?;

    let result = LatencyDetector::default().detect(&samples);
    if result.algorithm != Algorithm::LatencyBased || result.concurrency() != Some(2) {
        return Err(fail_with(format!("Unexpected result: {:?}", result)));
    }

    let first_token = LatencyDetector::first_token(1.0).detect(&samples);
    if first_token.is_bottleneck {
        return Err(fail("Zero first-token latencies must be skipped"));
    }
    if first_token.algorithm != Algorithm::FirstTokenLatencyBased {
        return Err(fail("Unexpected first-token algorithm"));
    }
    Ok(())
}

#[test]
fn best_selectors_break_ties_toward_higher_concurrency() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 0),
        level(2, 30.0, 80),
        level(4, 30.0, 80),
        level(8, 20.0, 120),
    ]);
    let samples = samples(&data)?;

    if best_qps(&samples).map(|sample| sample.concurrency) != Some(4) {
        return Err(fail("Best QPS should be the higher tied level"));
    }
    if best_tokens_throughput(&samples).map(|sample| sample.concurrency) != Some(4) {
        return Err(fail("Best throughput should be the higher tied level"));
    }
    if best_latency(&samples).map(|sample| sample.concurrency) != Some(4) {
        return Err(fail("Best latency must ignore zero and prefer higher ties"));
    }
    if best_first_token_latency(&samples).is_some() {
        return Err(fail("No level reports first-token latency"));
    }
    if best_success_rate(&samples).map(|sample| sample.concurrency) != Some(8) {
        return Err(fail("Equal success rates resolve to the highest level"));
    }
    if best_qps(&[]).is_some() {
        return Err(fail("Empty sweep has no best level"));
    }
    Ok(())
}

#[test]
fn recommendation_for_single_level() -> AppResult<()> {
    let data = results(&[level(8, 30.0, 100)]);
    let samples = samples(&data)?;
    let recommendation = recommend_concurrency(&samples, &Thresholds::default())
        .ok_or_else(|| fail("Expected a recommendation"))?;
    if recommendation.reason != RecommendationReason::SingleLevel
        || recommendation.level.concurrency != 8
    {
        return Err(fail_with(format!("Unexpected: {:?}", recommendation)));
    }
    if recommend_concurrency(&[], &Thresholds::default()).is_some() {
        return Err(fail("Empty sweep has no recommendation"));
    }
    Ok(())
}

#[test]
fn recommendation_prefers_lower_of_two_bottlenecks() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 100),
        level(2, 18.0, 150),
        level(3, 22.0, 250),
        level(4, 22.01, 400),
    ]);
    let samples = samples(&data)?;
    let recommendation = recommend_concurrency(&samples, &Thresholds::default())
        .ok_or_else(|| fail("Expected a recommendation"))?;
    if recommendation.reason != RecommendationReason::LatencyBottleneck
        || recommendation.level.concurrency != 2
    {
        return Err(fail_with(format!("Unexpected: {:?}", recommendation)));
    }
    Ok(())
}

#[test]
fn recommendation_flags_short_qps_bottleneck_runs() -> AppResult<()> {
    let mut levels = vec![level(1, 10.0, 100), level(4, 40.0, 100), level(8, 40.0, 100)];
    if let Some(plateau) = levels.get_mut(1) {
        plateau.successful = 6;
    }
    let data = results(&levels);
    let samples = samples(&data)?;
    let recommendation = recommend_concurrency(&samples, &Thresholds::default())
        .ok_or_else(|| fail("Expected a recommendation"))?;
    if recommendation.reason
        != (RecommendationReason::QpsBottleneckUnconfirmed { total_requests: 6 })
        || recommendation.level.concurrency != 4
    {
        return Err(fail_with(format!("Unexpected: {:?}", recommendation)));
    }
    if recommendation.reason.phrase_key() != "reasonQpsBottleneckUnconfirmed" {
        return Err(fail("Unexpected phrase key"));
    }
    Ok(())
}

#[test]
fn recommendation_without_bottleneck_picks_best_qps() -> AppResult<()> {
    let data = results(&[level(1, 10.0, 100), level(2, 20.0, 100), level(4, 40.0, 100)]);
    let samples = samples(&data)?;
    let recommendation = recommend_concurrency(&samples, &Thresholds::default())
        .ok_or_else(|| fail("Expected a recommendation"))?;
    if recommendation.reason != RecommendationReason::MaximizesBoth
        || recommendation.level.concurrency != 4
    {
        return Err(fail_with(format!("Unexpected: {:?}", recommendation)));
    }
    Ok(())
}

#[test]
fn recommendation_balances_when_tokens_peak_elsewhere() -> AppResult<()> {
    let mut levels = vec![level(1, 10.0, 90), level(2, 20.0, 100), level(4, 40.0, 110)];
    if let Some(peak) = levels.get_mut(1) {
        peak.tokens = 1_000.0;
    }
    let data = results(&levels);
    let samples = samples(&data)?;
    let recommendation = recommend_concurrency(&samples, &Thresholds::default())
        .ok_or_else(|| fail("Expected a recommendation"))?;
    if recommendation.reason != RecommendationReason::Balanced
        || recommendation.level.concurrency != 4
    {
        return Err(fail_with(format!("Unexpected: {:?}", recommendation)));
    }
    Ok(())
}

#[test]
fn analysis_honours_statistical_method() -> AppResult<()> {
    let data = results(&[
        level(1, 10.0, 100),
        level(2, 20.0, 100),
        level(3, 30.0, 100),
        level(4, 30.5, 100),
        level(5, 30.8, 100),
        level(6, 31.0, 100),
    ]);
    let samples = samples(&data)?;
    let window = NonZeroUsize::new(3).ok_or_else(|| fail("window"))?;
    let analysis = Analysis::run(&samples, &Thresholds::statistical(window));

    if analysis.qps_bottleneck.algorithm != Algorithm::StatisticalBased {
        return Err(fail("Statistical method not used"));
    }
    if analysis.qps_bottleneck.concurrency() != Some(3) {
        return Err(fail_with(format!("Unexpected: {:?}", analysis.qps_bottleneck)));
    }
    if analysis.best_qps.map(|level| level.concurrency) != Some(6) {
        return Err(fail("Unexpected best QPS"));
    }
    Ok(())
}
