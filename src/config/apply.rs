use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::ReportArgs;
use crate::args::parsers::{check_threshold, check_window, parse_brand};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when a config value fails the same validation as its
/// command-line flag.
pub fn apply_config(
    args: &mut ReportArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "input")
        && let Some(input) = config.input.clone()
    {
        args.input = Some(input);
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "lang")
        && let Some(lang) = config.lang
    {
        args.lang = lang;
    }

    if !is_cli(matches, "title_brand")
        && let Some(brand) = config.title_brand.as_deref()
    {
        args.title_brand = parse_brand(brand).map_err(|err| invalid("title_brand", err))?;
    }

    if !is_cli(matches, "qps_threshold")
        && let Some(threshold) = config.qps_threshold
    {
        args.qps_threshold =
            Some(check_threshold(threshold).map_err(|err| invalid("qps_threshold", err))?);
    }

    if !is_cli(matches, "latency_ratio_threshold")
        && let Some(threshold) = config.latency_ratio_threshold
    {
        args.latency_ratio_threshold =
            check_threshold(threshold).map_err(|err| invalid("latency_ratio_threshold", err))?;
    }

    if !is_cli(matches, "statistical_window")
        && let Some(window) = config.statistical_window
    {
        args.statistical_window =
            Some(check_window(window).map_err(|err| invalid("statistical_window", err))?);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn invalid(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
