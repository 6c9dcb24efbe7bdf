//! Types shared by analytics API readers.

use crate::utils::error::ApiError;
use async_trait::async_trait;

/// Raw JSON payload from either endpoint (opaque here, validated by the parser)
///
/// We keep this as `serde_json::Value` because the birdseye payload is keyed
/// by project id and the log payload carries many fields we ignore.
pub type RawPayload = serde_json::Value;

/// Parameters of the credentialed, detailed log read
#[derive(Debug, Clone, Copy)]
pub struct LogQuery<'a> {
    pub project_id: &'a str,
    pub window_days: u32,
    pub api_key: &'a str,
}

/// Something that can perform the two remote reads of an aggregation cycle
///
/// `ApiClient` is the HTTP implementation; tests and offline runs plug in
/// their own.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Aggregate summary for the window; no credential required
    async fn fetch_birdseye(
        &self,
        project_id: &str,
        window_days: u32,
    ) -> Result<RawPayload, ApiError>;

    /// Time-bucketed log with referrer breakdown; requires the API key
    async fn fetch_log(&self, query: &LogQuery<'_>) -> Result<RawPayload, ApiError>;
}

/// Source that replays two fixed payloads
///
/// **Public** - backs the offline `normalize` command
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub birdseye: RawPayload,
    pub log: RawPayload,
}

#[async_trait]
impl AnalyticsSource for StaticSource {
    async fn fetch_birdseye(
        &self,
        _project_id: &str,
        _window_days: u32,
    ) -> Result<RawPayload, ApiError> {
        Ok(self.birdseye.clone())
    }

    async fn fetch_log(&self, _query: &LogQuery<'_>) -> Result<RawPayload, ApiError> {
        Ok(self.log.clone())
    }
}
