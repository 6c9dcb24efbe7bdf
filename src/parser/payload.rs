//! Parsers for the two raw analytics payloads.
//!
//! The API returns loosely typed JSON, so we walk `serde_json::Value`
//! ourselves and report the exact path of whatever is missing or malformed.
//! Any problem here is a shape failure for the whole cycle; we never
//! recover individual fields.

use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;

/// Aggregate summary for the lookback window
#[derive(Debug, Clone, PartialEq)]
pub struct RawBirdseyeSummary {
    pub unique_visitors: u64,
    pub total_pageviews: u64,
    pub avg_session_duration_seconds: f64,
}

/// One entry of the referrer breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReferrer {
    pub name: String,
    pub count: u64,
}

impl RawReferrer {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Daily chart series, index aligned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTimeSeries {
    pub dates: Vec<String>,
    pub visit_counts: Vec<u64>,
}

/// Everything we need from the detailed log read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogData {
    pub referrers: Vec<RawReferrer>,
    pub series: RawTimeSeries,
}

/// Parse the birdseye payload for `project_id`
///
/// **Public** - expects `{ "<project_id>": { "current": { "unique", "all", "sdur" } } }`
///
/// # Errors
/// * `ParseError::MissingField` - project entry, `current` or one of its fields is absent
/// * `ParseError::InvalidValue` - a field is not a non-negative number
pub fn parse_birdseye(project_id: &str, raw: &Value) -> Result<RawBirdseyeSummary, ParseError> {
    debug!("Parsing birdseye summary for project: {}", project_id);

    let project = require(raw, project_id, "")?;
    let current = require(project, "current", project_id)?;
    let path = format!("{}.current", project_id);

    let summary = RawBirdseyeSummary {
        unique_visitors: as_count(require(current, "unique", &path)?, &join(&path, "unique"))?,
        total_pageviews: as_count(require(current, "all", &path)?, &join(&path, "all"))?,
        avg_session_duration_seconds: as_seconds(
            require(current, "sdur", &path)?,
            &join(&path, "sdur"),
        )?,
    };

    debug!(
        "Birdseye: {} sessions, {} pageviews, {:.1}s average",
        summary.unique_visitors, summary.total_pageviews, summary.avg_session_duration_seconds
    );

    Ok(summary)
}

/// Parse the detailed log payload
///
/// **Public** - expects
/// `{ "chart": { "x", "visits" }, "params": { "ref": [{ "name", "count" }] } }`
///
/// Series length agreement is not checked here; the weekly extractor owns
/// that rule.
pub fn parse_log(raw: &Value) -> Result<RawLogData, ParseError> {
    let chart = require(raw, "chart", "")?;
    let params = require(raw, "params", "")?;

    let dates = as_array(require(chart, "x", "chart")?, "chart.x")?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str().map(str::to_string).ok_or_else(|| ParseError::InvalidValue {
                field: format!("chart.x[{}]", i),
                reason: "expected a date string".to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let visit_counts = as_array(require(chart, "visits", "chart")?, "chart.visits")?
        .iter()
        .enumerate()
        .map(|(i, v)| as_count(v, &format!("chart.visits[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let referrers = as_array(require(params, "ref", "params")?, "params.ref")?
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_referrer(entry, i))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Log: {} referrers, {} chart buckets",
        referrers.len(),
        dates.len()
    );

    Ok(RawLogData {
        referrers,
        series: RawTimeSeries {
            dates,
            visit_counts,
        },
    })
}

/// Parse a single `params.ref[i]` entry
///
/// **Private** - internal helper for parse_log
fn parse_referrer(entry: &Value, index: usize) -> Result<RawReferrer, ParseError> {
    let path = format!("params.ref[{}]", index);

    let name = require(entry, "name", &path)?
        .as_str()
        .ok_or_else(|| ParseError::InvalidValue {
            field: join(&path, "name"),
            reason: "expected a string".to_string(),
        })?;

    if name.is_empty() {
        return Err(ParseError::InvalidValue {
            field: join(&path, "name"),
            reason: "referrer name is empty".to_string(),
        });
    }

    let count = as_count(require(entry, "count", &path)?, &join(&path, "count"))?;

    Ok(RawReferrer::new(name, count))
}

fn require<'a>(value: &'a Value, key: &str, parent: &str) -> Result<&'a Value, ParseError> {
    match value.get(key) {
        Some(Value::Null) | None => Err(ParseError::MissingField(join(parent, key))),
        Some(v) => Ok(v),
    }
}

fn as_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, ParseError> {
    value.as_array().ok_or_else(|| ParseError::InvalidValue {
        field: field.to_string(),
        reason: "expected an array".to_string(),
    })
}

/// Non-negative integer counts only; negative, fractional and non-numeric
/// values are rejected rather than coerced.
fn as_count(value: &Value, field: &str) -> Result<u64, ParseError> {
    value.as_u64().ok_or_else(|| ParseError::InvalidValue {
        field: field.to_string(),
        reason: format!("expected a non-negative integer, got {}", value),
    })
}

fn as_seconds(value: &Value, field: &str) -> Result<f64, ParseError> {
    match value.as_f64() {
        Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(ParseError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a non-negative number of seconds, got {}", value),
        }),
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
