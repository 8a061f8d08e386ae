//! Analyze and watch command implementations.
//!
//! The analyze command:
//! 1. Fetches the procedure profile and details (in parallel)
//! 2. Ranks procedures and computes combined weights
//! 3. Renders charts
//! 4. Writes the report and chart files
//!
//! Watch repeats the same pass on a fixed interval, keeping one
//! aggregator for the whole run.

use super::models::{AnalyzeArgs, WatchArgs};
use super::poll::run_poll;
use crate::aggregator::ProcedureProfileAggregator;
use crate::chart::{BarChartConfig, ChartKind, ChartRenderer, SvgChartRenderer, TextChartRenderer};
use crate::output::{write_report, write_svg};
use crate::parser::schema::{AnalysisReport, DisplayState};
use crate::rpc::VoltClient;
use crate::source::{SnapshotSource, StatsSource};
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Neither statistics fetch succeeded
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    let source = build_source(&args)?;
    info!("Analyzing procedures from {}", source.describe());

    let mut aggregator = ProcedureProfileAggregator::new();
    let report = analyze_once(source.as_ref(), &mut aggregator, &args)?;

    if report.display_state == DisplayState::AnalyzeNowPrompt {
        anyhow::bail!("No statistics could be fetched from {}", report.source);
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Execute the watch command
///
/// **Public** - polling loop called from main.rs
///
/// A poll where every fetch failed leaves the previous outputs in place.
pub fn execute_watch(args: WatchArgs) -> Result<()> {
    let source = build_source(&args.analyze)?;
    info!(
        "Watching {} every {:.1}s",
        source.describe(),
        args.interval.as_secs_f64()
    );

    let mut aggregator = ProcedureProfileAggregator::new();
    let mut poll: u64 = 0;

    loop {
        poll += 1;
        info!("Poll {}", poll);

        let report = analyze_once(source.as_ref(), &mut aggregator, &args.analyze)?;
        if report.display_state == DisplayState::AnalyzeNowPrompt {
            warn!("Poll {} fetched nothing, keeping previous outputs", poll);
        }
        info!("{}", aggregator.summary());

        if args.iterations.is_some_and(|n| poll >= n) {
            break;
        }
        std::thread::sleep(args.interval);
    }

    Ok(())
}

/// Run one poll and write whatever it produced
fn analyze_once(
    source: &dyn StatsSource,
    aggregator: &mut ProcedureProfileAggregator,
    args: &AnalyzeArgs,
) -> Result<AnalysisReport> {
    let mut config = BarChartConfig::new().with_max_bars(args.top);
    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    }
    let mut svg_renderer = SvgChartRenderer::new(config);
    let mut text_renderer = TextChartRenderer::new(args.top, args.chart);

    let report = {
        let mut renderers: Vec<&mut dyn ChartRenderer> = Vec::new();
        if args.svg_dir.is_some() {
            renderers.push(&mut svg_renderer);
        }
        if args.print_summary {
            renderers.push(&mut text_renderer);
        }
        run_poll(source, aggregator, &mut renderers).context("Failed to render charts")?
    };

    if report.display_state == DisplayState::AnalyzeNowPrompt {
        return Ok(report);
    }

    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    // charts are rewritten on every pass so they never outlive the report
    if let Some(dir) = &args.svg_dir {
        for kind in ChartKind::ALL {
            if let Some(svg) = svg_renderer.chart(kind) {
                let path = dir.join(format!("{}.svg", kind.file_stem()));
                write_svg(svg, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        info!("✓ Charts written to: {}", dir.display());
    }

    if args.print_summary {
        print_summary(&report, &text_renderer);
    }

    Ok(report)
}

fn print_summary(report: &AnalysisReport, text: &TextChartRenderer) {
    println!("\n{}", "=".repeat(80));
    println!("PROCEDURE PROFILE");
    println!("{}", "=".repeat(80));
    println!("Source:     {}", report.source);
    println!("Procedures: {}", report.procedure_count);
    println!("State:      {}", report.display_state.describe());
    if let Some(total) = report.total_load {
        println!("Total load: {:.3}", total);
    }
    println!("\n{}", text.render());
    println!("{}", "=".repeat(80));
}

/// Build the statistics source selected by the arguments
///
/// **Public** - also used by tests
pub fn build_source(args: &AnalyzeArgs) -> Result<Box<dyn StatsSource>> {
    if let Some(path) = &args.snapshot {
        return Ok(Box::new(SnapshotSource::new(path)));
    }

    let mut client = VoltClient::with_timeout(&args.endpoint, args.timeout)
        .context("Failed to create API client")?;
    if let Some(user) = &args.user {
        client = client.with_credentials(user, args.password.clone().unwrap_or_default());
    }
    Ok(Box::new(client))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.snapshot.is_none() {
        if args.endpoint.is_empty() {
            anyhow::bail!("Endpoint cannot be empty");
        }

        if !args.endpoint.starts_with("http://") && !args.endpoint.starts_with("https://") {
            anyhow::bail!("Endpoint must start with http:// or https://");
        }
    }

    if args.password.is_some() && args.user.is_none() {
        anyhow::bail!("A password was given without a user");
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    if args.timeout.is_zero() {
        anyhow::bail!("timeout must be greater than 0");
    }

    Ok(())
}

/// Validate watch arguments
pub fn validate_watch_args(args: &WatchArgs) -> Result<()> {
    validate_args(&args.analyze)?;

    if args.interval.is_zero() {
        anyhow::bail!("interval must be greater than 0");
    }

    if args.iterations == Some(0) {
        anyhow::bail!("iterations must be greater than 0");
    }

    Ok(())
}
