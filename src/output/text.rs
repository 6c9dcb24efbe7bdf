//! Terminal rendering of the visitor dashboard.
//!
//! The dashboard owns its own display state. The aggregation pipeline only
//! produces `NormalizedMetrics`; loading and error display live here.

use super::favicon::favicon_url;
use crate::aggregator::duration::format_duration;
use crate::parser::schema::NormalizedMetrics;
use crate::utils::error::error_chain;

const GAUGE_WIDTH: usize = 20;
const BAR_WIDTH: usize = 40;
const NAME_WIDTH: usize = 36;

/// What the dashboard is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Failed(String),
    Ready(NormalizedMetrics),
}

impl DashboardState {
    /// Settle a finished cycle into a displayable state
    ///
    /// The failure message carries the whole cause chain, so a transport
    /// failure still shows the underlying status or connection error.
    pub fn from_result<E: std::error::Error>(result: Result<NormalizedMetrics, E>) -> Self {
        match result {
            Ok(metrics) => DashboardState::Ready(metrics),
            Err(e) => DashboardState::Failed(error_chain(&e)),
        }
    }
}

/// Render the dashboard for the given state
///
/// **Public** - main entry point for text output
pub fn render_dashboard(state: &DashboardState) -> String {
    match state {
        DashboardState::Loading => "Loading data...".to_string(),
        DashboardState::Failed(message) => format!("Error: {}", message),
        DashboardState::Ready(metrics) => render_metrics(metrics),
    }
}

/// Horizontal edge of the three summary cards (22, 22 and 26 wide)
fn card_border(left: char, join: char, right: char) -> String {
    let rule = |width: usize| "━".repeat(width);
    format!("  {left}{}{join}{}{join}{}{right}", rule(22), rule(22), rule(26))
}

fn render_metrics(metrics: &NormalizedMetrics) -> String {
    let mut lines = Vec::new();

    lines.push("  VISITORS".to_string());
    lines.push(card_border('┏', '┳', '┓'));
    lines.push(format!(
        "  ┃ {:^20} ┃ {:^20} ┃ {:^24} ┃",
        "SESSIONS", "TOTAL PAGEVIEWS", "AVERAGE SESSION DURATION"
    ));
    lines.push(format!(
        "  ┃ {:^20} ┃ {:^20} ┃ {:^24} ┃",
        metrics.sessions,
        metrics.pageviews,
        format_duration(metrics.avg_session_duration_seconds)
    ));
    lines.push(card_border('┗', '┻', '┛'));

    lines.push(String::new());
    lines.push("  TOP REFERRING WEBSITES".to_string());
    if metrics.top_referrers.is_empty() {
        lines.push("  (no referrers)".to_string());
    }
    for referrer in &metrics.top_referrers {
        lines.push(format!(
            "  {:<width$} {:>3}% {}",
            truncate(&referrer.name, NAME_WIDTH),
            referrer.percentage,
            gauge(referrer.percentage),
            width = NAME_WIDTH
        ));
        match favicon_url(&referrer.name) {
            Some(icon) => lines.push(format!("    icon: {}", icon)),
            None => lines.push("    icon: (none)".to_string()),
        }
    }

    lines.push(String::new());
    lines.push("  TRAFFIC FOR THE WEEK".to_string());
    if metrics.weekly_traffic.is_empty() {
        lines.push("  (no traffic data)".to_string());
    }
    let max = metrics.weekly_traffic.max_count();
    for (label, count) in metrics.weekly_traffic.iter() {
        lines.push(format!("  {:>11} {} {}", label, bar(count, max), count));
    }

    lines.join("\n")
}

/// Donut replacement: a fixed-width gauge filled to `percentage`
fn gauge(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * GAUGE_WIDTH + 50) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

/// Horizontal bar scaled against the largest bucket
fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((u128::from(count) * BAR_WIDTH as u128) / u128::from(max)) as usize;
    "█".repeat(len)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let tail: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", tail)
}
