use crate::output::{read_report, validate_metrics};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a metrics report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    validate_metrics(&report.metrics)?;

    println!("✓ Valid metrics report");
    println!("  Version: {}", report.version);
    println!("  Project: {}", report.project_id);
    println!("  Period: {}", report.period);
    println!("  Sessions: {}", report.metrics.sessions);
    println!("  Top Referrers: {}", report.metrics.top_referrers.len());
    println!("  Weekly Buckets: {}", report.metrics.weekly_traffic.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Traffic Lens Metrics Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string                        - Schema version (e.g., '1.0.0')");
        println!("  project_id: string                     - Analytics project id");
        println!("  period: string                         - Lookback window (e.g., '7d')");
        println!("  metrics: object");
        println!("    sessions: number                     - Unique sessions");
        println!("    pageviews: number                    - Total pageviews");
        println!("    avg_session_duration_seconds: number - Raw seconds");
        println!("    top_referrers: array (max 6)         - Sorted by share, descending");
        println!("      name: string                       - Referrer");
        println!("      percentage: number                 - Rounded share of sessions");
        println!("    weekly_traffic: object");
        println!("      labels: array (max 7)              - e.g. '5 JAN 2024'");
        println!("      counts: array (max 7)              - Visits per label");
        println!("  generated_at: string                   - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Traffic Lens v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A visitor analytics dashboard for Swetrix-compatible APIs.");
}
