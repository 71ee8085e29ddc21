use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::args::ReportFormat;

/// Appends `.{extension}` unless `path` already carries it.
#[must_use]
pub fn output_path(path: &Path, format: ReportFormat) -> PathBuf {
    let extension = format.extension();
    if path
        .extension()
        .is_some_and(|current| current == extension)
    {
        return path.to_path_buf();
    }
    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}
