//! Input data model for per-concurrency benchmark results.
//!
//! The comparison document is produced upstream by the load tester once
//! every concurrency level has finished. Values arrive pre-computed; this
//! module only resolves the metrics the report cannot render without.
mod sample;
mod types;

#[cfg(test)]
mod tests;

pub use sample::{Sample, validate};
pub use types::{BenchmarkResult, Comparison, Metrics};
