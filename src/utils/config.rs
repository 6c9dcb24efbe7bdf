//! Configuration and constants for the dashboard.

use std::time::Duration;

/// Default analytics API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.swetrix.com";

/// Path of the aggregate ("birdseye") summary endpoint
pub const BIRDSEYE_PATH: &str = "/v1/log/birdseye";

/// Path of the detailed, time-bucketed log endpoint
pub const LOG_PATH: &str = "/v1/log";

/// Header carrying the API credential for the detailed log read
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Project tracked when none is given on the command line
pub const DEFAULT_PROJECT_ID: &str = "STEzHcB1rALV";

/// Lookback window for both reads
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest window the CLI accepts
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Bucket size requested from the detailed log endpoint
pub const TIME_BUCKET: &str = "day";

/// Number of referrers kept after ranking
pub const TOP_REFERRER_LIMIT: usize = 6;

/// Number of most recent buckets shown in the weekly chart
pub const WEEKLY_BUCKETS: usize = 7;

/// Default timeout for a single HTTP request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Default timeout for a whole aggregation cycle (both reads + normalization)
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Favicon service used by the text dashboard
pub const FAVICON_SERVICE: &str = "https://icons.duckduckgo.com/ip3";

/// Format a window length as the API `period` parameter (e.g. `7d`)
pub fn period_param(window_days: u32) -> String {
    format!("{}d", window_days)
}
