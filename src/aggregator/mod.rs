//! Normalization of raw analytics payloads into display-ready metrics.
//!
//! This module transforms the two API payloads into:
//! - Ranked referrer shares
//! - The most recent week of daily traffic
//! - A single `NormalizedMetrics` value per aggregation cycle

pub mod duration;
pub mod pipeline;
pub mod referrers;
pub mod weekly;

// Re-export main types and functions
pub use duration::format_duration;
pub use pipeline::{aggregate, normalize, AggregateRequest, Aggregator};
pub use referrers::rank_referrers;
pub use weekly::{day_label, extract_recent_week};
