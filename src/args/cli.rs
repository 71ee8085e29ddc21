use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::analysis::{DEFAULT_LATENCY_RATIO_THRESHOLD, QpsMethod, Thresholds};
use crate::i18n::Locale;

use super::defaults::{DEFAULT_BRAND, DEFAULT_OUTPUT, default_qps_threshold};
use super::parsers::{parse_bool_env, parse_brand, parse_locale, parse_threshold, parse_window};
use super::types::ReportFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bilingual performance reports for LLM load-test concurrency sweeps: interactive HTML with a dual-axis QPS / tokens-per-second chart, plus JSON, CSV, PNG and console table outputs."
)]
pub struct ReportArgs {
    /// Comparison JSON written by the load tester
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Output path; the format's extension is appended when missing
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Report format
    #[arg(long, short, default_value = "html", ignore_case = true)]
    pub format: ReportFormat,

    /// Language the report opens in (en, zh)
    #[arg(long = "lang", short = 'l', default_value = "en", value_parser = parse_locale)]
    pub lang: Locale,

    /// Product name shown in the report title
    #[arg(long = "title-brand", default_value = DEFAULT_BRAND, value_parser = parse_brand)]
    pub title_brand: String,

    /// QPS bottleneck threshold: minimum QPS gain per added client, or the
    /// coefficient of variation when --statistical-window is set
    #[arg(long = "qps-threshold", value_parser = parse_threshold)]
    pub qps_threshold: Option<f64>,

    /// Latency bottleneck threshold: latency growth rate over concurrency growth rate
    #[arg(
        long = "latency-ratio-threshold",
        default_value_t = DEFAULT_LATENCY_RATIO_THRESHOLD,
        value_parser = parse_threshold
    )]
    pub latency_ratio_threshold: f64,

    /// Locate the QPS bottleneck with a sliding window of this many levels
    /// instead of the gradient method
    #[arg(long = "statistical-window", value_parser = parse_window)]
    pub statistical_window: Option<NonZeroUsize>,

    /// Enable verbose logging (sets log level to debug unless overridden by LLMPERF_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./llmperf-report.toml or ./llmperf-report.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl ReportArgs {
    /// Detector thresholds selected by the arguments.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        let qps_method = self
            .statistical_window
            .map_or(QpsMethod::Gradient, |window| QpsMethod::Statistical { window });
        Thresholds {
            qps_method,
            qps: self
                .qps_threshold
                .unwrap_or_else(|| default_qps_threshold(qps_method)),
            latency_ratio: self.latency_ratio_threshold,
        }
    }
}
