use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported report version {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  State: {}", report.display_state.describe());
    println!("  Procedures: {}", report.procedure_count);
    if let Some(series) = &report.series {
        println!("  Ranked: {}", series.len());
        if let Some(top) = series.combined.first() {
            println!("  Heaviest: {} ({:.1}%)", top.label, top.value * 100.0);
        }
    }
    println!("  Generated: {}", report.generated_at);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Procedure Profile Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Endpoint URL or snapshot path");
        println!("  display_state: string      - analyze_now_prompt | no_data | data_available");
        println!("  procedure_count: number    - Procedures in the profile batch");
        println!("  total_load: number?        - Sum of (avg / 1e8) * invocations");
        println!("  series: object?            - Ranked chart series (same order)");
        println!("    latency: array           - {{label, value = avg / 1e8}}");
        println!("    frequency: array         - {{label, value = invocations}}");
        println!("    combined: array          - {{label, value = share of total load}}");
        println!("  procedure_latency: array   - {{label, value = avg latency ms}}, slowest first");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Procedure Profile Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Stored-procedure profile analysis for VoltDB monitoring endpoints.");
}
