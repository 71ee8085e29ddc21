use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analysis::Analysis;
use crate::error::AppResult;
use crate::html::{duration_seconds, requests_cell};
use crate::i18n::{Dictionary, Locale};
use crate::model::Sample;

use super::format::{format_1dp, format_2dp, write_line};

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Thread")]
    concurrency: u32,
    #[tabled(rename = "Reqs")]
    requests: String,
    #[tabled(rename = "Dur(s)")]
    duration: String,
    #[tabled(rename = "QPS")]
    qps: String,
    #[tabled(rename = "Toks/s")]
    tokens_per_second: String,
    #[tabled(rename = "Avg")]
    latency_avg: u64,
    #[tabled(rename = "P50")]
    latency_p50: u64,
    #[tabled(rename = "P90")]
    latency_p90: u64,
    #[tabled(rename = "P99")]
    latency_p99: u64,
    #[tabled(rename = "1stAvg")]
    first_token_avg: u64,
    #[tabled(rename = "1stP50")]
    first_token_p50: u64,
    #[tabled(rename = "1stP90")]
    first_token_p90: u64,
    #[tabled(rename = "1stP99")]
    first_token_p99: u64,
    #[tabled(rename = "ReqToks")]
    request_tokens: String,
    #[tabled(rename = "ResToks")]
    response_tokens: String,
}

impl From<&Sample<'_>> for TableRow {
    fn from(sample: &Sample<'_>) -> Self {
        let metrics = sample.metrics;
        Self {
            concurrency: sample.concurrency,
            requests: requests_cell(metrics),
            duration: duration_seconds(metrics.total_duration_ms),
            qps: format_2dp(sample.qps),
            tokens_per_second: format_2dp(sample.tokens_per_second),
            latency_avg: metrics.average_latency_ms,
            latency_p50: metrics.latency_p50_ms,
            latency_p90: metrics.latency_p90_ms,
            latency_p99: metrics.latency_p99_ms,
            first_token_avg: metrics.average_first_token_latency_ms,
            first_token_p50: metrics.first_token_latency_p50_ms,
            first_token_p90: metrics.first_token_latency_p90_ms,
            first_token_p99: metrics.first_token_latency_p99_ms,
            request_tokens: format_1dp(metrics.average_request_tokens),
            response_tokens: format_1dp(metrics.average_response_tokens),
        }
    }
}

/// Renders the sweep as a boxed console table followed by the
/// recommendation line.
///
/// # Errors
///
/// Returns an error if writing to the output buffer fails.
pub fn render_table(samples: &[Sample<'_>], analysis: &Analysis, locale: Locale) -> AppResult<String> {
    let mut output = String::new();
    if samples.is_empty() {
        write_line(&mut output, "No test results available.")?;
        return Ok(output);
    }

    let rows: Vec<TableRow> = samples.iter().map(TableRow::from).collect();
    let table = Table::new(rows).with(Style::modern()).to_string();
    write_line(&mut output, &table)?;

    if let Some(recommendation) = analysis.recommendation {
        let dictionary = Dictionary::builtin();
        let caption = dictionary
            .lookup(locale, "optimalConcurrency")
            .unwrap_or("Optimal Concurrency");
        let reason = dictionary
            .lookup(locale, recommendation.reason.console_key())
            .unwrap_or_default();
        write_line(
            &mut output,
            &format!(
                "{}: {} {}",
                caption, recommendation.level.concurrency, reason
            ),
        )?;
    }
    Ok(output)
}
