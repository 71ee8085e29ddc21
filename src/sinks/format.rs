use std::fmt::Write as _;

use crate::chart::format_fixed;
use crate::error::{AppError, AppResult, SinkError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line).map_err(|err| AppError::sink(SinkError::WriteLine { source: err }))
}

pub(super) fn format_2dp(value: f64) -> String {
    format_fixed(value, 2)
}

pub(super) fn format_1dp(value: f64) -> String {
    format_fixed(value, 1)
}
