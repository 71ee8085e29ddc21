use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::locale::Locale;

/// Phrase table keyed by locale, then by translation key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    phrases: BTreeMap<Locale, BTreeMap<String, String>>,
}

static BUILTIN: Lazy<Dictionary> = Lazy::new(|| {
    Dictionary::default()
        .with_phrases(Locale::En, EN_PHRASES.iter().copied())
        .with_phrases(Locale::Zh, ZH_PHRASES.iter().copied())
});

impl Dictionary {
    /// The report's phrase table.
    #[must_use]
    pub fn builtin() -> &'static Dictionary {
        &BUILTIN
    }

    /// Adds or replaces phrases for `locale`.
    #[must_use]
    pub fn with_phrases<'phrase, I>(mut self, locale: Locale, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'phrase str, &'phrase str)>,
    {
        let table = self.phrases.entry(locale).or_default();
        for (key, phrase) in entries {
            table.insert(key.to_owned(), phrase.to_owned());
        }
        self
    }

    #[must_use]
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.phrases
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn keys(&self, locale: Locale) -> impl Iterator<Item = &str> {
        self.phrases
            .get(&locale)
            .into_iter()
            .flat_map(|table| table.keys().map(String::as_str))
    }
}

const EN_PHRASES: &[(&str, &str)] = &[
    ("concurrentTestComparison", "Concurrent Test Comparison"),
    ("bestPerformance", "Best Performance"),
    ("highestQPS", "Highest QPS"),
    ("noDataAvailable", "No data available"),
    ("bestThroughput", "Best Throughput"),
    ("highestTokensPerSecond", "Highest Tokens per Second"),
    ("e2eLatencyBottleneck", "E2E Latency Bottleneck"),
    ("bottleneckDetected", "Bottleneck Detected"),
    ("noBottleneckDetected", "No Bottleneck Detected"),
    ("recommended", "Recommended"),
    ("optimalConcurrency", "Optimal Concurrency"),
    ("detailedComparison", "Detailed Comparison"),
    ("concurrency", "Concurrency"),
    ("requests", "Requests"),
    ("duration", "Duration (s)"),
    ("qps", "QPS"),
    ("tokensPerSec", "Tokens/sec"),
    ("e2eLatency", "E2E Latency (ms)"),
    ("firstTokenLatency", "First Token Latency (ms)"),
    ("tokenMetrics", "Token Metrics"),
    ("average", "Average"),
    ("p50", "P50"),
    ("p90", "P90"),
    ("p99", "P99"),
    ("request", "Request"),
    ("response", "Response"),
    ("performanceMetricsChart", "Performance Metrics Chart"),
    ("errorStatistics", "Error Statistics"),
    ("errorRate", "Error Rate"),
    ("errorTypeDistribution", "Error Type Distribution"),
    ("noErrors", "No errors"),
    ("generatedAt", "Generated at"),
    ("reasonSingleLevel", "Only one concurrency level was tested."),
    (
        "reasonQpsBottleneck",
        "QPS stops scaling past this level. Stay at or below it for optimal throughput.",
    ),
    (
        "reasonQpsBottleneckUnconfirmed",
        "QPS stops scaling past this level, but <em>only a few requests</em> were processed there. Run a longer test to confirm.",
    ),
    (
        "reasonQpsBottleneckUnconfirmedPlain",
        "QPS stops scaling past this level, but only a few requests were processed there. Run a longer test to confirm.",
    ),
    (
        "reasonLatencyBottleneck",
        "Latency grows faster than concurrency past this level. Stay at or below it to keep latency low.",
    ),
    (
        "reasonMaximizesBoth",
        "This level maximizes both QPS and token throughput.",
    ),
    (
        "reasonBalanced",
        "This level balances QPS against latency.",
    ),
    ("reasonMaximumQps", "This level delivers the maximum QPS."),
];

const ZH_PHRASES: &[(&str, &str)] = &[
    ("concurrentTestComparison", "并发测试比较"),
    ("bestPerformance", "最佳性能"),
    ("highestQPS", "最高 QPS"),
    ("noDataAvailable", "无可用数据"),
    ("bestThroughput", "最佳吞吐量"),
    ("highestTokensPerSecond", "最高每秒令牌数"),
    ("e2eLatencyBottleneck", "端到端延迟瓶颈"),
    ("bottleneckDetected", "检测到瓶颈"),
    ("noBottleneckDetected", "未检测到瓶颈"),
    ("recommended", "推荐"),
    ("optimalConcurrency", "最优并发数"),
    ("detailedComparison", "详细比较"),
    ("concurrency", "并发数"),
    ("requests", "请求数"),
    ("duration", "持续时间 (秒)"),
    ("qps", "QPS"),
    ("tokensPerSec", "Tokens/秒"),
    ("e2eLatency", "端到端延迟 (毫秒)"),
    ("firstTokenLatency", "首Token延迟 (毫秒)"),
    ("tokenMetrics", "Token指标"),
    ("average", "平均"),
    ("p50", "P50"),
    ("p90", "P90"),
    ("p99", "P99"),
    ("request", "请求"),
    ("response", "响应"),
    ("performanceMetricsChart", "性能指标图表"),
    ("errorStatistics", "错误统计"),
    ("errorRate", "错误率"),
    ("errorTypeDistribution", "错误类型分布"),
    ("noErrors", "无错误"),
    ("generatedAt", "生成时间"),
    ("reasonSingleLevel", "仅测试了一个并发级别。"),
    (
        "reasonQpsBottleneck",
        "超过该并发级别后 QPS 不再提升，建议不超过此级别以获得最佳吞吐量。",
    ),
    (
        "reasonQpsBottleneckUnconfirmed",
        "超过该并发级别后 QPS 不再提升，但该级别<em>仅处理了少量请求</em>，建议运行更长时间的测试进行确认。",
    ),
    (
        "reasonQpsBottleneckUnconfirmedPlain",
        "超过该并发级别后 QPS 不再提升，但该级别仅处理了少量请求，建议运行更长时间的测试进行确认。",
    ),
    (
        "reasonLatencyBottleneck",
        "超过该并发级别后延迟增长快于并发增长，建议不超过此级别以保持低延迟。",
    ),
    ("reasonMaximizesBoth", "该并发级别同时达到最高 QPS 和最高 Token 吞吐量。"),
    ("reasonBalanced", "该并发级别在 QPS 与延迟之间取得平衡。"),
    ("reasonMaximumQps", "该并发级别可获得最高 QPS。"),
];
