//! Chart data shaping and dual-axis chart configuration.
mod config;
mod png;
mod series;

#[cfg(test)]
mod tests;

pub use config::{
    Axis, AxisGrid, AxisKind, AxisPosition, AxisTitle, ChartData, ChartOptions, Dataset,
    Interaction, InteractionMode, Legend, LegendPosition, Plugins, RenderableChart, Scales,
    TooltipFormat, configure_chart,
};
pub use png::plot_throughput_chart;
pub use series::{ChartSeries, build_series, format_qps, format_tokens};
pub(crate) use series::format_fixed;
