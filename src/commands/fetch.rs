//! Fetch command implementation.
//!
//! The fetch command:
//! 1. Reads the birdseye summary and detailed log concurrently
//! 2. Normalizes them into dashboard metrics
//! 3. Prints the dashboard and/or writes a JSON report

use super::models::{FetchArgs, NormalizeArgs};
use crate::aggregator::{aggregate, AggregateRequest, Aggregator};
use crate::api::types::RawPayload;
use crate::api::{ApiClient, StaticSource};
use crate::output::{build_report, render_dashboard, write_report, DashboardState};
use crate::parser::schema::NormalizedMetrics;
use crate::utils::config::MAX_WINDOW_DAYS;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

/// Execute the fetch command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * API connection failures
/// * Malformed payloads
/// * File write errors
pub async fn execute_fetch(args: FetchArgs) -> Result<NormalizedMetrics> {
    let start_time = Instant::now();

    info!("Starting fetch for project: {}", args.project_id);
    info!("API endpoint: {}", args.base_url);

    if args.api_key.is_empty() {
        warn!("No API key configured; the detailed log read will likely be rejected");
    }

    let client = ApiClient::with_timeout(&args.base_url, args.timeout)
        .context("Failed to create API client")?;
    let aggregator = Aggregator::new(client).with_timeout(args.timeout);

    let request = AggregateRequest::new(&args.project_id, &args.api_key)
        .with_window_days(args.window_days);

    let result = aggregator.run(&request).await;

    if args.print_summary {
        let state = DashboardState::from_result(result.as_ref().cloned());
        println!("{}", render_dashboard(&state));
    }

    let metrics = result.with_context(|| {
        format!("Failed to aggregate metrics for project {}", args.project_id)
    })?;

    if let Some(path) = &args.output_json {
        write_metrics_report(&args.project_id, args.window_days, &metrics, path)?;
    }

    info!("Fetch completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(metrics)
}

/// Execute the normalize command over two saved payload files
///
/// **Public** - offline counterpart of `execute_fetch`; replays the files
/// through the same aggregation cycle a live fetch uses
pub async fn execute_normalize(args: NormalizeArgs) -> Result<NormalizedMetrics> {
    info!("Normalizing saved payloads for project: {}", args.project_id);

    let source = StaticSource {
        birdseye: read_payload(&args.birdseye_path)?,
        log: read_payload(&args.log_path)?,
    };
    let request = AggregateRequest::new(&args.project_id, "").with_window_days(args.window_days);

    let metrics = aggregate(&source, &request)
        .await
        .context("Failed to normalize saved payloads")?;

    if args.print_summary {
        println!("{}", render_dashboard(&DashboardState::Ready(metrics.clone())));
    }

    if let Some(path) = &args.output_json {
        write_metrics_report(&args.project_id, args.window_days, &metrics, path)?;
    }

    Ok(metrics)
}

fn read_payload(path: &Path) -> Result<RawPayload> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn write_metrics_report(
    project_id: &str,
    window_days: u32,
    metrics: &NormalizedMetrics,
    path: &Path,
) -> Result<()> {
    let report = build_report(project_id, window_days, metrics.clone());
    write_report(&report, path).context("Failed to write metrics report")?;
    info!("✓ Report written to: {}", path.display());
    Ok(())
}

/// Validate fetch arguments
///
/// **Public** - can be called before execute_fetch for early validation
pub fn validate_args(args: &FetchArgs) -> Result<()> {
    if args.base_url.is_empty() {
        anyhow::bail!("API base URL cannot be empty");
    }

    if !args.base_url.starts_with("http://") && !args.base_url.starts_with("https://") {
        anyhow::bail!("API base URL must start with http:// or https://");
    }

    validate_project_and_window(&args.project_id, args.window_days)?;

    if args.timeout.is_zero() {
        anyhow::bail!("timeout must be greater than 0");
    }

    Ok(())
}

/// Validate normalize arguments
pub fn validate_normalize_args(args: &NormalizeArgs) -> Result<()> {
    validate_project_and_window(&args.project_id, args.window_days)
}

fn validate_project_and_window(project_id: &str, window_days: u32) -> Result<()> {
    if project_id.trim().is_empty() {
        anyhow::bail!("Project id cannot be empty");
    }

    if !project_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        anyhow::bail!("Project id contains invalid characters");
    }

    if window_days == 0 {
        anyhow::bail!("days must be greater than 0");
    }

    if window_days > MAX_WINDOW_DAYS {
        anyhow::bail!("days is too large (max {})", MAX_WINDOW_DAYS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_validate_args_valid() {
        let args = FetchArgs {
            api_key: "secret".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_base_url() {
        let args = FetchArgs {
            base_url: String::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_scheme() {
        let args = FetchArgs {
            base_url: "ftp://api.swetrix.com".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_project() {
        let args = FetchArgs {
            project_id: "  ".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_project_with_query_chars() {
        let args = FetchArgs {
            project_id: "abc&period=1d".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_days() {
        let args = FetchArgs {
            window_days: 0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_too_many_days() {
        let args = FetchArgs {
            window_days: 1000,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_timeout() {
        let args = FetchArgs {
            timeout: Duration::ZERO,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
