use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::Analysis;
use crate::args::ReportFormat;
use crate::chart::{ChartSeries, RenderableChart, plot_throughput_chart};
use crate::error::{AppError, AppResult, SinkError};
use crate::html::{PageOptions, ReportPage};
use crate::model::{Metrics, Sample};

use super::config::output_path;
use super::format::{format_2dp, write_line};
use super::table::render_table;

const CSV_HEADER: &str = "concurrency,total_requests,successful_requests,failed_requests,success_rate,qps,tokens_per_second,average_latency,latency_p50,latency_p90,latency_p99,average_request_tokens,average_response_tokens,average_first_token_latency,first_token_latency_p50,first_token_latency_p90,first_token_latency_p99";

/// Everything a sink may render.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'report> {
    pub samples: &'report [Sample<'report>],
    pub analysis: &'report Analysis,
    pub series: &'report ChartSeries,
    pub chart: &'report RenderableChart,
    pub page: &'report PageOptions,
}

#[derive(Debug, Serialize)]
struct JsonReport<'report> {
    generated_at: String,
    test_results: Vec<JsonResult<'report>>,
    analysis: &'report Analysis,
}

#[derive(Debug, Serialize)]
struct JsonResult<'report> {
    concurrency: u32,
    metrics: &'report Metrics,
}

/// Writes the report in `format`.
///
/// File formats go to `output` with the format's extension appended when
/// missing; the console table goes to stdout. Returns the written path.
///
/// # Errors
///
/// Returns an error if the output cannot be rendered, serialized, or written.
pub async fn write_report(
    format: ReportFormat,
    output: &Path,
    context: &ReportContext<'_>,
) -> AppResult<Option<PathBuf>> {
    if format == ReportFormat::Table {
        let table = render_table(context.samples, context.analysis, context.page.locale)?;
        print!("{}", table);
        return Ok(None);
    }

    let path = output_path(output, format);
    ensure_parent(&path).await?;
    match format {
        ReportFormat::Html => write_html(&path, context).await?,
        ReportFormat::Json => write_json(&path, context).await?,
        ReportFormat::Csv => write_csv(&path, context).await?,
        ReportFormat::Png => {
            if context.series.is_empty() {
                warn!("No results to plot, skipping {}", path.display());
                return Ok(None);
            }
            plot_throughput_chart(context.series, &path)?;
        }
        ReportFormat::Table => return Ok(None),
    }
    info!("Report written to {}", path.display());
    Ok(Some(path))
}

async fn write_html(path: &Path, context: &ReportContext<'_>) -> AppResult<()> {
    let page = ReportPage::build(
        context.samples,
        context.analysis,
        context.chart,
        context.page,
    )
    .map_err(AppError::sink)?;
    write_file(path, page.render()).await
}

async fn write_json(path: &Path, context: &ReportContext<'_>) -> AppResult<()> {
    let report = JsonReport {
        generated_at: context.page.generated_at.to_rfc3339(),
        test_results: context
            .samples
            .iter()
            .map(|sample| JsonResult {
                concurrency: sample.concurrency,
                metrics: sample.metrics,
            })
            .collect(),
        analysis: context.analysis,
    };
    let json = serde_json::to_string_pretty(&report).map_err(|source| {
        AppError::sink(SinkError::Serialize {
            context: "JSON report",
            source,
        })
    })?;
    write_file(path, json).await
}

async fn write_csv(path: &Path, context: &ReportContext<'_>) -> AppResult<()> {
    let output = render_csv(context.samples)?;
    write_file(path, output).await
}

pub(super) fn render_csv(samples: &[Sample<'_>]) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, CSV_HEADER)?;
    for sample in samples {
        let metrics = sample.metrics;
        let row = [
            sample.concurrency.to_string(),
            metrics.total_requests.to_string(),
            metrics.successful_requests.to_string(),
            metrics.failed_requests.to_string(),
            format_2dp(metrics.success_rate),
            format_2dp(sample.qps),
            format_2dp(sample.tokens_per_second),
            metrics.average_latency_ms.to_string(),
            metrics.latency_p50_ms.to_string(),
            metrics.latency_p90_ms.to_string(),
            metrics.latency_p99_ms.to_string(),
            format_2dp(metrics.average_request_tokens),
            format_2dp(metrics.average_response_tokens),
            metrics.average_first_token_latency_ms.to_string(),
            metrics.first_token_latency_p50_ms.to_string(),
            metrics.first_token_latency_p90_ms.to_string(),
            metrics.first_token_latency_p99_ms.to_string(),
        ];
        write_line(&mut output, &row.join(","))?;
    }
    Ok(output)
}

async fn ensure_parent(path: &Path) -> AppResult<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(parent).await.map_err(|source| {
        AppError::sink(SinkError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
    })
}

async fn write_file(path: &Path, contents: String) -> AppResult<()> {
    tokio::fs::write(path, contents).await.map_err(|source| {
        AppError::sink(SinkError::WriteReport {
            path: path.to_path_buf(),
            source,
        })
    })
}
