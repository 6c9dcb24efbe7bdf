//! Presentation of normalized metrics.
//!
//! This module handles:
//! - JSON metrics reports (write, read, validate)
//! - The terminal dashboard and its display state
//! - Favicon lookup for referrers

pub mod favicon;
pub mod json;
pub mod text;

// Re-export main functions
pub use favicon::favicon_url;
pub use json::{build_report, read_report, report_to_string, validate_metrics, write_report};
pub use text::{render_dashboard, DashboardState};
