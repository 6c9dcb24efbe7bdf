//! Analytics API access.

pub mod client;
pub mod types;

// Re-export main types
pub use client::ApiClient;
pub use types::{AnalyticsSource, LogQuery, RawPayload, StaticSource};
