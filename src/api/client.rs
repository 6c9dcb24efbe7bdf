//! HTTP client for the Swetrix-compatible analytics API.

use super::types::{AnalyticsSource, LogQuery, RawPayload};
use crate::utils::config::{
    period_param, API_KEY_HEADER, BIRDSEYE_PATH, DEFAULT_HTTP_TIMEOUT, LOG_PATH, TIME_BUCKET,
};
use crate::utils::error::ApiError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Analytics API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET and decode the JSON body
    ///
    /// **Private** - shared by both reads
    async fn get_json(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<RawPayload, ApiError> {
        let response = request.send().await.map_err(ApiError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<RawPayload>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl AnalyticsSource for ApiClient {
    async fn fetch_birdseye(
        &self,
        project_id: &str,
        window_days: u32,
    ) -> Result<RawPayload, ApiError> {
        let endpoint = self.endpoint(BIRDSEYE_PATH);
        info!("Fetching birdseye summary for project: {}", project_id);

        let period = period_param(window_days);
        let request = self
            .client
            .get(&endpoint)
            .query(&[("pid", project_id), ("period", period.as_str())]);

        debug!("GET {} pid={} period={}", endpoint, project_id, period);
        self.get_json(&endpoint, request).await
    }

    async fn fetch_log(&self, query: &LogQuery<'_>) -> Result<RawPayload, ApiError> {
        let endpoint = self.endpoint(LOG_PATH);
        info!("Fetching detailed log for project: {}", query.project_id);

        let period = period_param(query.window_days);
        let request = self
            .client
            .get(&endpoint)
            .query(&[
                ("pid", query.project_id),
                ("timeBucket", TIME_BUCKET),
                ("period", period.as_str()),
            ])
            .header(API_KEY_HEADER, query.api_key);

        // Never log the credential itself
        debug!(
            "GET {} pid={} timeBucket={} period={} (api key: {})",
            endpoint,
            query.project_id,
            TIME_BUCKET,
            period,
            if query.api_key.is_empty() { "absent" } else { "present" }
        );
        self.get_json(&endpoint, request).await
    }
}

/// Strip trailing slashes so endpoint paths join cleanly
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
