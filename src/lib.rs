//! Traffic Lens
//!
//! Visitor analytics dashboard for Swetrix-compatible analytics APIs.
//!
//! The library turns two raw API payloads (the aggregate "birdseye" summary
//! and the daily event log) into one display-ready [`parser::NormalizedMetrics`]
//! value: sessions, pageviews, average session duration, top referrers and the
//! most recent week of traffic.
//!
//! ## Getting Started
//!
//! ```bash
//! SWETRIX_API_KEY=... traffic-lens fetch --project STEzHcB1rALV
//! ```

pub mod aggregator;
pub mod api;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
