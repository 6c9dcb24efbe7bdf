//! Payload parsing and schema definitions.
//!
//! This module handles:
//! - Parsing the raw birdseye and log JSON payloads
//! - Validating payload shape
//! - Defining the normalized output schema

pub mod payload;
pub mod schema;

// Re-export main types
pub use payload::{
    parse_birdseye, parse_log, RawBirdseyeSummary, RawLogData, RawReferrer, RawTimeSeries,
};
pub use schema::{MetricsReport, NormalizedMetrics, ReferrerShare, WeeklyTraffic};
