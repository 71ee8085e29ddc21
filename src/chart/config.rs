use serde::Serialize;

use super::series::{ChartSeries, format_fixed};

pub(crate) const PRIMARY_AXIS_ID: &str = "y";
pub(crate) const SECONDARY_AXIS_ID: &str = "y1";
pub(crate) const QPS_DATASET_LABEL: &str = "QPS (Queries Per Second)";
pub(crate) const TOKENS_DATASET_LABEL: &str = "Tokens/sec";
const QPS_COLOR: &str = "#2196f3";
const QPS_FILL: &str = "rgba(33, 150, 243, 0.1)";
const TOKENS_COLOR: &str = "#4caf50";
const TOKENS_FILL: &str = "rgba(76, 175, 80, 0.1)";
const LINE_WIDTH: u8 = 2;
const TOOLTIP_DECIMALS: u8 = 2;

/// Declarative line chart handed to the charting backend.
///
/// Serializes to the Chart.js configuration shape. The tooltip formatter is
/// not representable as JSON; the bootstrap script installs it from
/// [`RenderableChart::tooltip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableChart {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
    #[serde(skip)]
    pub tooltip: TooltipFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<u32>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u8,
    pub fill: bool,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Every dataset's value at the hovered category.
    Index,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
    pub y1: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AxisPosition>,
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<AxisGrid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisGrid {
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
}

/// Tooltip label policy: one fixed precision for every dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipFormat {
    pub decimals: u8,
}

impl Default for TooltipFormat {
    fn default() -> Self {
        Self {
            decimals: TOOLTIP_DECIMALS,
        }
    }
}

impl TooltipFormat {
    /// Renders `"<label>: <value>"`, dropping the prefix for unlabeled
    /// datasets and the value for gaps.
    #[must_use]
    pub fn label(self, dataset_label: &str, value: Option<f64>) -> String {
        let mut label = dataset_label.to_owned();
        if !label.is_empty() {
            label.push_str(": ");
        }
        if let Some(value) = value {
            label.push_str(&format_fixed(value, self.decimals));
        }
        label
    }
}

/// Builds the dual-axis line chart for a series.
///
/// QPS binds to the left axis, token throughput to the right axis whose
/// gridlines stay off the plot area. Hovering a category shows both values.
#[must_use]
pub fn configure_chart(series: &ChartSeries) -> RenderableChart {
    RenderableChart {
        kind: "line",
        data: ChartData {
            labels: series.categories.clone(),
            datasets: vec![
                Dataset {
                    label: QPS_DATASET_LABEL,
                    data: series.primary_series.clone(),
                    border_color: QPS_COLOR,
                    background_color: QPS_FILL,
                    border_width: LINE_WIDTH,
                    fill: false,
                    y_axis_id: PRIMARY_AXIS_ID,
                },
                Dataset {
                    label: TOKENS_DATASET_LABEL,
                    data: series.secondary_series.clone(),
                    border_color: TOKENS_COLOR,
                    background_color: TOKENS_FILL,
                    border_width: LINE_WIDTH,
                    fill: false,
                    y_axis_id: SECONDARY_AXIS_ID,
                },
            ],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: Interaction {
                mode: InteractionMode::Index,
                intersect: false,
            },
            scales: Scales {
                x: Axis {
                    kind: AxisKind::Category,
                    display: true,
                    position: None,
                    title: AxisTitle {
                        display: true,
                        text: "Concurrency Level",
                    },
                    grid: None,
                },
                y: Axis {
                    kind: AxisKind::Linear,
                    display: true,
                    position: Some(AxisPosition::Left),
                    title: AxisTitle {
                        display: true,
                        text: "QPS",
                    },
                    grid: None,
                },
                y1: Axis {
                    kind: AxisKind::Linear,
                    display: true,
                    position: Some(AxisPosition::Right),
                    title: AxisTitle {
                        display: true,
                        text: TOKENS_DATASET_LABEL,
                    },
                    grid: Some(AxisGrid {
                        draw_on_chart_area: false,
                    }),
                },
            },
            plugins: Plugins {
                legend: Legend {
                    display: true,
                    position: LegendPosition::Top,
                },
            },
        },
        tooltip: TooltipFormat::default(),
    }
}
