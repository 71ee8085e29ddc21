//! Report outputs: HTML page, JSON, CSV, PNG chart and the console table.
mod config;
mod format;
mod table;
mod writers;


pub use config::output_path;
pub use table::render_table;
pub use writers::{ReportContext, write_report};
