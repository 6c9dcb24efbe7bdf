use crate::utils::config::{
    DEFAULT_API_BASE_URL, DEFAULT_CYCLE_TIMEOUT, DEFAULT_PROJECT_ID, DEFAULT_WINDOW_DAYS,
};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the fetch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FetchArgs {
    /// Analytics API base URL
    pub base_url: String,

    /// Project to aggregate
    pub project_id: String,

    /// API key for the detailed log read
    pub api_key: String,

    /// Lookback window in days
    pub window_days: u32,

    /// Whole-cycle timeout
    pub timeout: Duration,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print the dashboard to stdout
    pub print_summary: bool,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            api_key: String::new(),
            window_days: DEFAULT_WINDOW_DAYS,
            timeout: DEFAULT_CYCLE_TIMEOUT,
            output_json: None,
            print_summary: true,
        }
    }
}

/// Arguments for the offline normalize command
#[derive(Debug, Clone)]
pub struct NormalizeArgs {
    pub project_id: String,
    pub window_days: u32,
    pub birdseye_path: PathBuf,
    pub log_path: PathBuf,
    pub output_json: Option<PathBuf>,
    pub print_summary: bool,
}
