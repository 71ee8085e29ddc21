use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Invalid threshold '{value}': {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Threshold must be a finite number >= 0, got {value}.")]
    ThresholdOutOfRange { value: f64 },
    #[error("Invalid statistical window '{value}': {source}")]
    InvalidWindow {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Statistical window must be >= 2.")]
    WindowTooSmall,
    #[error("Missing input (set --input or provide in config).")]
    MissingInput,
    #[error("Failed to read input '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse input '{path}': {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Title brand must not be empty.")]
    EmptyBrand,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
