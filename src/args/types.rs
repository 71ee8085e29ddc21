use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Interactive bilingual page with the Chart.js chart
    Html,
    /// Results plus analysis, readable again as input
    Json,
    Csv,
    /// Static dual-axis chart
    Png,
    /// Console table on stdout
    Table,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Png => "png",
            ReportFormat::Table => "txt",
        }
    }
}
