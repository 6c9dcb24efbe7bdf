//! Extract the most recent week from a daily chart series.
//!
//! Labels use the calendar day exactly as written in the API date string.
//! No timezone conversion is applied, so a bucket dated `2024-01-05 00:00:00`
//! is always labelled `5 JAN 2024` wherever the dashboard runs.

use crate::parser::schema::WeeklyTraffic;
use crate::utils::config::WEEKLY_BUCKETS;
use crate::utils::error::NormalizeError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use log::debug;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Take the last `WEEKLY_BUCKETS` entries of a chart series
///
/// **Public** - main entry point for weekly extraction
///
/// # Arguments
/// * `dates` - Bucket dates, assumed chronological
/// * `counts` - Visits per bucket, index aligned with `dates`
///
/// # Errors
/// * `NormalizeError::ShapeMismatch` - the two series differ in length
/// * `NormalizeError::InvalidDate` - a selected date cannot be parsed
pub fn extract_recent_week(
    dates: &[String],
    counts: &[u64],
) -> Result<WeeklyTraffic, NormalizeError> {
    if dates.len() != counts.len() {
        return Err(NormalizeError::ShapeMismatch {
            dates: dates.len(),
            counts: counts.len(),
        });
    }

    let start = dates.len().saturating_sub(WEEKLY_BUCKETS);
    debug!(
        "Extracting {} of {} chart buckets",
        dates.len() - start,
        dates.len()
    );

    let labels = dates[start..]
        .iter()
        .map(|d| day_label(d))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeeklyTraffic {
        labels,
        counts: counts[start..].to_vec(),
    })
}

/// Render a date string as `5 JAN 2024`
///
/// **Public** - also used to label ad-hoc series
pub fn day_label(raw: &str) -> Result<String, NormalizeError> {
    let date = parse_calendar_day(raw)?;
    let month = date.format("%b").to_string().to_uppercase();
    Ok(format!("{} {} {}", date.day(), month, date.year()))
}

/// Calendar day of a date string, as written
///
/// **Private** - RFC 3339 values keep their own offset's date
fn parse_calendar_day(raw: &str) -> Result<NaiveDate, NormalizeError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| NormalizeError::InvalidDate(raw.to_string()))
}
