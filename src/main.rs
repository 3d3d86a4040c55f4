//! Sumi-Glean main entry point
//!
//! This is the command-line interface for the Sumi-Glean batch enricher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use sumi_glean::batch::{enrich, load_urls};
use sumi_glean::config::{load_config_with_hash, Config};
use sumi_glean::output::{JsonLinesSink, RecordSink};
use tracing_subscriber::EnvFilter;

/// Sumi-Glean: A batch contact enricher
///
/// Sumi-Glean reads a list of URLs, fetches every page concurrently and
/// writes one JSON line per page with the phone numbers and logo it found.
#[derive(Parser, Debug)]
#[command(name = "sumi-glean")]
#[command(version = "1.0.0")]
#[command(about = "A batch contact enricher", long_about = None)]
struct Cli {
    /// File with one URL per line (reads standard input when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of URLs processed concurrently
    #[arg(short, long)]
    workers: Option<u32>,

    /// Emit a failure record for URLs that could not be fetched
    #[arg(long)]
    report_failures: bool,

    /// Exit with status 2 when any URL could not be fetched
    #[arg(long)]
    fail_on_error: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    let urls = load_urls(cli.input.as_deref()).context("Failed to read URL list")?;

    let sink: Arc<dyn RecordSink> = Arc::new(JsonLinesSink::new(std::io::stdout()));
    let summary = enrich(&config, urls, sink)
        .await
        .context("Failed to start batch")?;

    summary.log();

    if cli.fail_on_error && summary.has_failures() {
        tracing::warn!("{} URLs could not be fetched", summary.failed);
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to standard error; standard output carries only records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_glean=info,warn"),
            1 => EnvFilter::new("sumi_glean=debug,info"),
            2 => EnvFilter::new("sumi_glean=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(workers) = cli.workers {
        config.pool.workers = workers;
    }
    if cli.report_failures {
        config.output.report_failures = true;
    }

    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Workers: {}, retries: {}, retry delay: {}ms",
        config.pool.workers,
        config.fetcher.max_retries,
        config.fetcher.retry_delay_ms
    );

    Ok(config)
}
