use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{debug, error, info};

use llmperf_report::analysis::Analysis;
use llmperf_report::args::ReportArgs;
use llmperf_report::chart::{ChartSeries, configure_chart};
use llmperf_report::config::{apply_config, load_config};
use llmperf_report::error::{AppError, AppResult, ValidationError};
use llmperf_report::html::PageOptions;
use llmperf_report::model::{Comparison, validate};
use llmperf_report::sinks::{ReportContext, write_report};

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["llmperf-report.toml", "llmperf-report.json"];

pub(crate) fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    let loaded_config = load_config(args.config.as_deref())?;
    if let Some(config) = loaded_config.as_ref() {
        apply_config(&mut args, &matches, config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(ReportArgs, ArgMatches)>> {
    let mut cmd = ReportArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ReportArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: ReportArgs) -> AppResult<()> {
    let Some(input) = args.input.as_deref() else {
        error!("Missing input (set --input or provide in config).");
        return Err(AppError::validation(ValidationError::MissingInput));
    };
    let comparison = read_comparison(input).await?;
    debug!(
        "Loaded {} benchmark results from {}",
        comparison.len(),
        input.display()
    );

    let samples = validate(&comparison.test_results)?;
    let series = ChartSeries::from_samples(&samples);
    let chart = configure_chart(&series);
    let thresholds = args.thresholds();
    let analysis = Analysis::run(&samples, &thresholds);
    if let Some(recommendation) = analysis.recommendation.as_ref() {
        info!(
            "Recommended concurrency: {} ({})",
            recommendation.level.concurrency,
            recommendation.reason.phrase_key()
        );
    }

    let page = PageOptions::new(&args.title_brand, args.lang);
    let context = ReportContext {
        samples: &samples,
        analysis: &analysis,
        series: &series,
        chart: &chart,
        page: &page,
    };
    write_report(args.format, &args.output, &context).await?;
    Ok(())
}

async fn read_comparison(path: &Path) -> AppResult<Comparison> {
    let payload = tokio::fs::read_to_string(path).await.map_err(|err| {
        AppError::validation(ValidationError::ReadInput {
            path: PathBuf::from(path),
            source: err,
        })
    })?;
    Comparison::from_json(&payload).map_err(|err| {
        AppError::validation(ValidationError::ParseInput {
            path: PathBuf::from(path),
            source: err,
        })
    })
}
