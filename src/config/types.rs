use std::path::PathBuf;

use serde::Deserialize;

use crate::args::ReportFormat;
use crate::i18n::Locale;

/// Report settings read from `llmperf-report.toml` / `llmperf-report.json`.
///
/// Every field is optional; values given on the command line win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    #[serde(alias = "language")]
    pub lang: Option<Locale>,
    #[serde(alias = "brand")]
    pub title_brand: Option<String>,
    pub qps_threshold: Option<f64>,
    pub latency_ratio_threshold: Option<f64>,
    pub statistical_window: Option<usize>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}
