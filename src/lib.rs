//! Core library for the `llmperf-report` CLI.
//!
//! This crate turns the per-concurrency results of an LLM load-test sweep
//! into reports: a bilingual (English / Chinese) HTML page with a dual-axis
//! QPS and tokens-per-second chart, plus JSON, CSV, PNG and console table
//! outputs. It also locates throughput and latency bottlenecks and
//! recommends a concurrency level. The primary user-facing interface is the
//! `llmperf-report` command-line application; library APIs may evolve as the
//! CLI grows.
pub mod analysis;
pub mod args;
pub mod chart;
pub mod config;
pub mod error;
pub mod html;
pub mod i18n;
pub mod model;
pub mod sinks;
