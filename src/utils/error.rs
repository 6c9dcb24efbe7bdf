//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the analytics API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}: {body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Errors raised when a payload does not have the expected shape
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors raised while normalizing already-parsed payloads
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Series length mismatch: {dates} dates but {counts} counts")]
    ShapeMismatch { dates: usize, counts: usize },

    #[error("Unrecognized date in chart series: {0:?}")]
    InvalidDate(String),
}

/// Errors surfaced by an aggregation cycle
///
/// Every failure of a cycle maps to exactly one variant; no partial
/// metrics are ever returned alongside an error.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Transport failure")]
    Transport(#[from] ApiError),

    #[error("Shape failure")]
    Shape(#[from] ParseError),

    #[error("Normalization failure")]
    Normalize(#[from] NormalizeError),

    #[error("Aggregation timed out after {0:?}")]
    Timeout(Duration),

    #[error("An aggregation for project {0} is already in flight")]
    AlreadyInFlight(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid metrics report: {0}")]
    InvalidReport(String),
}

/// Render an error and its sources as `outer: inner: innermost`
///
/// Wrapping variants above keep the inner error as `source` only, so this
/// (or anyhow's `{:#}`) is how the full message reaches the user.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
