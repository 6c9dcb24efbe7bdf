//! JSON metrics report writer.
//!
//! Writes `MetricsReport` structs to JSON files with proper formatting.

use crate::parser::schema::{MetricsReport, NormalizedMetrics};
use crate::utils::config::{period_param, SCHEMA_VERSION, TOP_REFERRER_LIMIT, WEEKLY_BUCKETS};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Wrap metrics in a versioned, timestamped report
///
/// **Public** - used by the fetch and normalize commands
pub fn build_report(
    project_id: &str,
    window_days: u32,
    metrics: NormalizedMetrics,
) -> MetricsReport {
    MetricsReport {
        version: SCHEMA_VERSION.to_string(),
        project_id: project_id.to_string(),
        period: period_param(window_days),
        metrics,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &MetricsReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing metrics report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &MetricsReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<MetricsReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading metrics report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: MetricsReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, project {}",
        report.version, report.project_id
    );

    Ok(report)
}

/// Check that loaded metrics still satisfy the model invariants
///
/// **Public** - a hand-edited or foreign report may not
pub fn validate_metrics(metrics: &NormalizedMetrics) -> Result<(), OutputError> {
    let referrers = &metrics.top_referrers;

    if referrers.len() > TOP_REFERRER_LIMIT {
        return Err(OutputError::InvalidReport(format!(
            "{} top referrers (max {})",
            referrers.len(),
            TOP_REFERRER_LIMIT
        )));
    }

    if let Some(bad) = referrers.iter().find(|r| r.percentage > 100) {
        return Err(OutputError::InvalidReport(format!(
            "referrer {} has share {}%",
            bad.name, bad.percentage
        )));
    }

    if referrers.windows(2).any(|w| w[0].percentage < w[1].percentage) {
        return Err(OutputError::InvalidReport(
            "top referrers are not sorted by share".to_string(),
        ));
    }

    let weekly = &metrics.weekly_traffic;
    if weekly.labels.len() != weekly.counts.len() {
        return Err(OutputError::InvalidReport(format!(
            "weekly traffic has {} labels but {} counts",
            weekly.labels.len(),
            weekly.counts.len()
        )));
    }

    if weekly.len() > WEEKLY_BUCKETS {
        return Err(OutputError::InvalidReport(format!(
            "weekly traffic has {} buckets (max {})",
            weekly.len(),
            WEEKLY_BUCKETS
        )));
    }

    let duration = metrics.avg_session_duration_seconds;
    if !duration.is_finite() || duration < 0.0 {
        return Err(OutputError::InvalidReport(
            "average session duration is negative or not finite".to_string(),
        ));
    }

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
