use chrono::{DateTime, Local};

use crate::analysis::{Analysis, Bottleneck, Level};
use crate::chart::{RenderableChart, format_fixed, format_qps, format_tokens};
use crate::error::SinkError;
use crate::i18n::{
    Dictionary, Locale, LocaleState, LocaleSwitcher, REPORT_TITLE_ID, ReportTitle,
};
use crate::model::{Metrics, Sample};

use super::dom::{NodeId, StaticDocument};
use super::script::{CHART_CANVAS_ID, bootstrap_script};
use super::style::STYLESHEET;

pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: ReportTitle,
    /// Language the page opens in.
    pub locale: Locale,
    pub dictionary: Dictionary,
    pub generated_at: DateTime<Local>,
}

impl PageOptions {
    #[must_use]
    pub fn new(brand: &str, locale: Locale) -> Self {
        Self {
            title: ReportTitle::for_brand(brand),
            locale,
            dictionary: Dictionary::builtin().clone(),
            generated_at: Local::now(),
        }
    }
}

/// The assembled, locale-normalized report page.
#[derive(Debug, Clone)]
pub struct ReportPage {
    document: StaticDocument,
}

impl ReportPage {
    /// Assembles the page and runs the switcher once so the served markup
    /// already reads in `options.locale`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Serialize`] when the chart configuration or the
    /// dictionary cannot be embedded.
    pub fn build(
        samples: &[Sample<'_>],
        analysis: &Analysis,
        chart: &RenderableChart,
        options: &PageOptions,
    ) -> Result<Self, SinkError> {
        let script = bootstrap_script(chart, &options.dictionary, &options.title, options.locale)?;
        let mut builder = Builder {
            document: StaticDocument::new(),
            dictionary: &options.dictionary,
        };
        builder.head(options);
        let body = builder.document.body();
        let container = builder
            .document
            .append(body, "div")
            .class("container")
            .id();
        builder.header(container, &options.title);
        builder.summary(container, analysis);
        builder.chart(container);
        builder.details(container, samples, analysis);
        builder.errors(container, samples);
        builder.footer(container, options.generated_at);
        builder.document.append(body, "script").markup(&script);

        let mut switcher = LocaleSwitcher::new(
            builder.document,
            LocaleState::new(options.dictionary.clone()),
            options.title.clone(),
        );
        switcher.initialize(options.locale);
        let mut document = switcher.into_document();
        let root = document.root();
        document.node(root).attr("lang", options.locale.code());
        Ok(Self { document })
    }

    #[must_use]
    pub const fn document(&self) -> &StaticDocument {
        &self.document
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.document.to_string()
    }
}

struct Builder<'page> {
    document: StaticDocument,
    dictionary: &'page Dictionary,
}

impl Builder<'_> {
    fn head(&mut self, options: &PageOptions) {
        let head = self.document.head();
        self.document.append(head, "meta").attr("charset", "utf-8");
        self.document
            .append(head, "meta")
            .attr("name", "viewport")
            .attr("content", "width=device-width, initial-scale=1");
        self.document
            .append(head, "title")
            .text(options.title.text(options.locale));
        self.document.append(head, "style").markup(STYLESHEET);
        self.document.append(head, "script").attr("src", CHART_JS_URL);
    }

    /// Appends a `tag` element carrying translation `key`, authored with the
    /// English phrase.
    fn label(&mut self, parent: NodeId, tag: &str, key: &str) -> NodeId {
        let fallback = self.dictionary.lookup(Locale::En, key).unwrap_or(key);
        self.document.append(parent, tag).i18n(key, fallback).id()
    }

    fn header(&mut self, container: NodeId, title: &ReportTitle) {
        let header = self.document.append(container, "div").class("header").id();
        self.document
            .append(header, "h1")
            .attr("id", REPORT_TITLE_ID)
            .text(title.text(Locale::En));
        let switch = self.document.append(header, "div").class("lang-switch").id();
        for locale in Locale::ALL {
            self.document
                .append(switch, "button")
                .attr("id", locale.control_id())
                .attr("type", "button")
                .text(locale.native_name());
        }
    }

    fn summary(&mut self, container: NodeId, analysis: &Analysis) {
        self.label(container, "h2", "concurrentTestComparison");
        let grid = self.document.append(container, "div").class("summary-grid").id();

        let card = self.card(grid, "bestPerformance", "highestQPS");
        self.level_value(card, analysis.best_qps, |level| {
            format!("{} QPS", format_qps(level.qps))
        });

        let card = self.card(grid, "bestThroughput", "highestTokensPerSecond");
        self.level_value(card, analysis.best_tokens_throughput, |level| {
            format!("{} tokens/s", format_tokens(level.tokens_per_second))
        });

        let card = self.document.append(grid, "div").class("card").id();
        self.label(card, "h3", "e2eLatencyBottleneck");
        self.bottleneck_status(card, &analysis.latency_bottleneck);

        let card = self.card(grid, "recommended", "optimalConcurrency");
        let Some(recommendation) = analysis.recommendation else {
            self.label(card, "p", "noDataAvailable");
            return;
        };
        self.document
            .append(card, "p")
            .class("metric-value")
            .text(&recommendation.level.concurrency.to_string());
        let reason = self.label(card, "p", recommendation.reason.phrase_key());
        self.document.node(reason).class("reason");
    }

    fn card(&mut self, grid: NodeId, heading: &str, caption: &str) -> NodeId {
        let card = self.document.append(grid, "div").class("card").id();
        self.label(card, "h3", heading);
        let caption = self.label(card, "p", caption);
        self.document.node(caption).class("metric-label");
        card
    }

    fn level_value<F>(&mut self, card: NodeId, level: Option<Level>, describe: F)
    where
        F: Fn(&Level) -> String,
    {
        let Some(level) = level else {
            self.label(card, "p", "noDataAvailable");
            return;
        };
        self.document
            .append(card, "p")
            .class("metric-value")
            .text(&describe(&level));
        self.concurrency_line(card, level.concurrency);
    }

    fn concurrency_line(&mut self, parent: NodeId, concurrency: u32) {
        let line = self.document.append(parent, "p").class("metric-label").id();
        self.label(line, "span", "concurrency");
        self.document
            .node(line)
            .text(&format!(": {}", concurrency));
    }

    fn bottleneck_status(&mut self, card: NodeId, bottleneck: &Bottleneck) {
        let Some(concurrency) = bottleneck.concurrency() else {
            let status = self.label(card, "p", "noBottleneckDetected");
            self.document.node(status).class("status-clear");
            return;
        };
        let status = self.label(card, "p", "bottleneckDetected");
        self.document.node(status).class("status-bottleneck");
        self.concurrency_line(card, concurrency);
    }

    fn chart(&mut self, container: NodeId) {
        let section = self.document.append(container, "div").class("section").id();
        self.label(section, "h2", "performanceMetricsChart");
        let holder = self
            .document
            .append(section, "div")
            .class("chart-container")
            .id();
        self.document
            .append(holder, "canvas")
            .attr("id", CHART_CANVAS_ID);
    }

    fn details(&mut self, container: NodeId, samples: &[Sample<'_>], analysis: &Analysis) {
        let section = self.document.append(container, "div").class("section").id();
        self.label(section, "h2", "detailedComparison");
        let table = self.document.append(section, "table").id();
        let head = self.document.append(table, "thead").id();

        let top = self.document.append(head, "tr").id();
        for key in ["concurrency", "requests", "duration", "qps", "tokensPerSec"] {
            let cell = self.label(top, "th", key);
            self.document.node(cell).attr("rowspan", "2");
        }
        for (key, span) in [
            ("e2eLatency", "4"),
            ("firstTokenLatency", "4"),
            ("tokenMetrics", "2"),
        ] {
            let cell = self.label(top, "th", key);
            self.document.node(cell).attr("colspan", span);
        }

        let sub = self.document.append(head, "tr").id();
        for key in [
            "average", "p50", "p90", "p99", "average", "p50", "p90", "p99", "request", "response",
        ] {
            self.label(sub, "th", key);
        }

        let body = self.document.append(table, "tbody").id();
        if samples.is_empty() {
            let row = self.document.append(body, "tr").id();
            let cell = self.label(row, "td", "noDataAvailable");
            self.document.node(cell).attr("colspan", "15");
            return;
        }
        let recommended = analysis
            .recommendation
            .map(|recommendation| recommendation.level.concurrency);
        for sample in samples {
            let row = self.document.append(body, "tr").id();
            if recommended == Some(sample.concurrency) {
                self.document.node(row).class("recommended");
            }
            for value in detail_cells(sample) {
                self.document.append(row, "td").text(&value);
            }
        }
    }

    fn errors(&mut self, container: NodeId, samples: &[Sample<'_>]) {
        let section = self.document.append(container, "div").class("section").id();
        self.label(section, "h2", "errorStatistics");
        let table = self.document.append(section, "table").id();
        let head = self.document.append(table, "thead").id();
        let row = self.document.append(head, "tr").id();
        for key in ["concurrency", "errorRate", "errorTypeDistribution"] {
            self.label(row, "th", key);
        }

        let body = self.document.append(table, "tbody").id();
        for sample in samples {
            let row = self.document.append(body, "tr").id();
            self.document
                .append(row, "td")
                .text(&sample.concurrency.to_string());
            self.document
                .append(row, "td")
                .text(&format!("{}%", format_fixed(sample.metrics.error_rate(), 2)));
            let cell = self.document.append(row, "td").id();
            let distribution = error_distribution(sample.metrics);
            if distribution.is_empty() {
                self.label(cell, "span", "noErrors");
                continue;
            }
            for (position, (kind, count)) in distribution.into_iter().enumerate() {
                if position > 0 {
                    self.document.append(cell, "br");
                }
                self.document
                    .node(cell)
                    .text(&format!("{}: {}", kind, count));
            }
        }
    }

    fn footer(&mut self, container: NodeId, generated_at: DateTime<Local>) {
        let footer = self.document.append(container, "p").class("footer").id();
        self.label(footer, "span", "generatedAt");
        self.document.node(footer).text(&format!(
            ": {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
}

fn detail_cells(sample: &Sample<'_>) -> Vec<String> {
    let metrics = sample.metrics;
    vec![
        sample.concurrency.to_string(),
        requests_cell(metrics),
        duration_seconds(metrics.total_duration_ms),
        format_qps(sample.qps),
        format_tokens(sample.tokens_per_second),
        metrics.average_latency_ms.to_string(),
        metrics.latency_p50_ms.to_string(),
        metrics.latency_p90_ms.to_string(),
        metrics.latency_p99_ms.to_string(),
        metrics.average_first_token_latency_ms.to_string(),
        metrics.first_token_latency_p50_ms.to_string(),
        metrics.first_token_latency_p90_ms.to_string(),
        metrics.first_token_latency_p99_ms.to_string(),
        format_fixed(metrics.average_request_tokens, 1),
        format_fixed(metrics.average_response_tokens, 1),
    ]
}

/// `successful/total` when some requests failed, otherwise the total.
pub(crate) fn requests_cell(metrics: &Metrics) -> String {
    if metrics.failed_requests > 0 {
        format!("{}/{}", metrics.successful_requests, metrics.total_requests)
    } else {
        metrics.total_requests.to_string()
    }
}

pub(crate) fn duration_seconds(duration_ms: u64) -> String {
    format_fixed(duration_ms as f64 / 1000.0, 2)
}

/// Error type counts, falling back to raw error messages when the producer
/// did not classify them.
pub(crate) fn error_distribution(metrics: &Metrics) -> Vec<(&str, u64)> {
    let counts = if metrics.error_type_counts.is_empty() {
        &metrics.error_counts
    } else {
        &metrics.error_type_counts
    };
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(kind, count)| (kind.as_str(), *count))
        .collect()
}
