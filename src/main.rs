//! Procedure Profile Studio CLI
//!
//! Ranks stored procedures by latency, invocation frequency and combined
//! load from a VoltDB monitoring endpoint, and renders the rankings.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use procedure_profile_studio::chart::ChartKind;
use procedure_profile_studio::commands::{
    display_schema, display_version, execute_analyze, execute_watch, validate_args,
    validate_report_file, validate_watch_args, AnalyzeArgs, WatchArgs,
};
use procedure_profile_studio::utils::config::{
    FileConfig, DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TOP_N,
};
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

/// Procedure Profile Studio - stored-procedure profiling for VoltDB
#[derive(Parser, Debug)]
#[command(name = "procprof")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by analyze and watch
#[derive(Args, Debug)]
struct AnalyzeOpts {
    /// HTTP endpoint of the database
    #[arg(short, long, env = "PROCPROF_ENDPOINT")]
    endpoint: Option<String>,

    /// API user
    #[arg(short, long, env = "PROCPROF_USER")]
    user: Option<String>,

    /// API password
    #[arg(long, env = "PROCPROF_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Read statistics from a snapshot JSON file (takes precedence over the endpoint)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Output path for the JSON report
    #[arg(short, long, default_value = "procedure-profile.json")]
    output: PathBuf,

    /// Directory for latency/frequency/combined SVG charts (optional)
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Only print this chart in the summary (frequency, combined; anything
    /// else shows execution time)
    #[arg(long, value_parser = parse_chart)]
    chart: Option<ChartKind>,

    /// Number of procedures per chart
    #[arg(long)]
    top: Option<usize>,

    /// Print text charts to stdout
    #[arg(long)]
    summary: bool,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch statistics once and rank procedures
    Analyze {
        #[command(flatten)]
        opts: AnalyzeOpts,
    },

    /// Poll statistics on a fixed interval
    Watch {
        #[command(flatten)]
        opts: AnalyzeOpts,

        /// Seconds between polls
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many polls
        #[arg(long)]
        iterations: Option<u64>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze { opts } => {
            let (args, _) = resolve_args(opts)?;
            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Watch {
            opts,
            interval,
            iterations,
        } => {
            let (analyze, file_config) = resolve_args(opts)?;
            let interval_secs = interval
                .or(file_config.poll_interval_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

            let args = WatchArgs {
                analyze,
                interval: Duration::from_secs(interval_secs),
                iterations,
            };
            validate_watch_args(&args)?;
            execute_watch(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Merge CLI flags over the optional config file
///
/// **Private** - flags win, then the file, then built-in defaults
fn resolve_args(opts: AnalyzeOpts) -> Result<(AnalyzeArgs, FileConfig)> {
    let file_config = match &opts.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FileConfig::default(),
    };

    let timeout = opts
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| file_config.timeout());

    let args = AnalyzeArgs {
        endpoint: opts
            .endpoint
            .or_else(|| file_config.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        user: opts.user.or_else(|| file_config.user.clone()),
        password: opts.password.or_else(|| file_config.password.clone()),
        timeout,
        snapshot: opts.snapshot,
        output_json: opts.output,
        svg_dir: opts.svg_dir,
        title: opts.title,
        chart: opts.chart,
        top: opts.top.or(file_config.top).unwrap_or(DEFAULT_TOP_N),
        print_summary: opts.summary,
    };

    Ok((args, file_config))
}

/// `--chart` follows the tab-label mapping, so it never rejects a value
fn parse_chart(label: &str) -> Result<ChartKind, Infallible> {
    Ok(ChartKind::from_tab_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_flag_uses_tab_labels() {
        let cli = Cli::try_parse_from(["procprof", "analyze", "--chart", "Frequency"]).unwrap();
        match cli.command {
            Commands::Analyze { opts } => assert_eq!(opts.chart, Some(ChartKind::Frequency)),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["procprof", "analyze", "--chart", "bogus"]).unwrap();
        match cli.command {
            Commands::Analyze { opts } => assert_eq!(opts.chart, Some(ChartKind::Latency)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
