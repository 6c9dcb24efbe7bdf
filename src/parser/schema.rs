//! Normalized metrics model and the JSON report envelope.
//!
//! `NormalizedMetrics` is what the pipeline hands to presentation.
//! `MetricsReport` is what we write to disk. Schema is versioned to allow
//! future evolution.

use serde::{Deserialize, Serialize};

/// Display-ready metrics for one aggregation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    /// Unique sessions in the window
    pub sessions: u64,

    /// Total pageviews in the window
    pub pageviews: u64,

    /// Average session duration, raw seconds (formatted at display time)
    pub avg_session_duration_seconds: f64,

    /// Ranked referrer shares, descending by percentage
    pub top_referrers: Vec<ReferrerShare>,

    /// Most recent daily buckets
    pub weekly_traffic: WeeklyTraffic,
}

/// A referrer and its share of sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerShare {
    pub name: String,

    /// Rounded share of sessions, 0..=100
    pub percentage: u8,
}

/// Label/count pairs for the weekly chart, index aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTraffic {
    /// Chart labels such as `5 JAN 2024`
    pub labels: Vec<String>,

    /// Visits per label
    pub counts: Vec<u64>,
}

impl WeeklyTraffic {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    /// Largest bucket, 0 when empty
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Project the metrics belong to
    pub project_id: String,

    /// API period parameter, e.g. `7d`
    pub period: String,

    pub metrics: NormalizedMetrics,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,
}
