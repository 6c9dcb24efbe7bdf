//! One aggregation cycle: two reads, then normalization.
//!
//! The cycle is `Idle -> Fetching -> Succeeded | Failed`. Callers only ever
//! see the final `Result`; a failed read or a malformed payload fails the
//! whole cycle and no partial metrics escape.

use super::referrers::rank_referrers;
use super::weekly::extract_recent_week;
use crate::api::types::{AnalyticsSource, LogQuery, RawPayload};
use crate::parser::payload::{parse_birdseye, parse_log};
use crate::parser::schema::NormalizedMetrics;
use crate::utils::config::{DEFAULT_CYCLE_TIMEOUT, DEFAULT_WINDOW_DAYS, TOP_REFERRER_LIMIT};
use crate::utils::error::{error_chain, AggregateError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// What to aggregate
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub project_id: String,
    pub window_days: u32,
    pub api_key: String,
}

impl AggregateRequest {
    /// Request over the default 7-day window
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            window_days: DEFAULT_WINDOW_DAYS,
            api_key: api_key.into(),
        }
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }
}

/// Run one aggregation cycle against `source`
///
/// **Public** - main entry point for aggregation
///
/// Both reads are issued concurrently and must succeed. The first failure
/// aborts the cycle and drops the other read.
///
/// # Errors
/// * `AggregateError::Transport` - either read failed
/// * `AggregateError::Shape` - a payload is missing expected fields
/// * `AggregateError::Normalize` - the chart series is inconsistent
pub async fn aggregate<S>(
    source: &S,
    request: &AggregateRequest,
) -> Result<NormalizedMetrics, AggregateError>
where
    S: AnalyticsSource + ?Sized,
{
    let query = LogQuery {
        project_id: &request.project_id,
        window_days: request.window_days,
        api_key: &request.api_key,
    };

    info!("Step 1/2: Fetching birdseye summary and detailed log...");
    let (birdseye, log) = tokio::try_join!(
        source.fetch_birdseye(&request.project_id, request.window_days),
        source.fetch_log(&query),
    )?;

    info!("Step 2/2: Normalizing payloads...");
    normalize(&request.project_id, &birdseye, &log)
}

/// Derive `NormalizedMetrics` from the two raw payloads
///
/// **Public** - pure; also used offline on saved payloads
pub fn normalize(
    project_id: &str,
    birdseye: &RawPayload,
    log: &RawPayload,
) -> Result<NormalizedMetrics, AggregateError> {
    let summary = parse_birdseye(project_id, birdseye)?;
    let log = parse_log(log)?;

    let top_referrers = rank_referrers(&log.referrers, summary.unique_visitors, TOP_REFERRER_LIMIT);
    let weekly_traffic = extract_recent_week(&log.series.dates, &log.series.visit_counts)?;

    debug!(
        "Normalized: {} referrers kept, {} weekly buckets",
        top_referrers.len(),
        weekly_traffic.len()
    );

    Ok(NormalizedMetrics {
        sessions: summary.unique_visitors,
        pageviews: summary.total_pageviews,
        avg_session_duration_seconds: summary.avg_session_duration_seconds,
        top_referrers,
        weekly_traffic,
    })
}

/// Aggregation service with a cycle timeout and per-project overlap guard
///
/// A second `run` for a project whose cycle is still in flight fails fast
/// with `AggregateError::AlreadyInFlight`. Dropping a `run` future cancels
/// its reads and releases the project.
pub struct Aggregator<S> {
    source: S,
    timeout: Duration,
    in_flight: Mutex<HashSet<String>>,
}

impl<S: AnalyticsSource> Aggregator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            timeout: DEFAULT_CYCLE_TIMEOUT,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one guarded, time-limited cycle
    pub async fn run(
        &self,
        request: &AggregateRequest,
    ) -> Result<NormalizedMetrics, AggregateError> {
        let _guard = InFlightGuard::acquire(&self.in_flight, &request.project_id)?;
        let start = Instant::now();

        info!(
            "Starting aggregation for project {} over {} days",
            request.project_id, request.window_days
        );

        let cycle = aggregate(&self.source, request);
        let result = match tokio::time::timeout(self.timeout, cycle).await {
            Ok(result) => result,
            Err(_) => Err(AggregateError::Timeout(self.timeout)),
        };

        match &result {
            Ok(_) => info!(
                "Aggregation completed in {:.2}s",
                start.elapsed().as_secs_f64()
            ),
            Err(e) => warn!(
                "Aggregation for project {} failed: {}",
                request.project_id,
                error_chain(e)
            ),
        }

        result
    }
}

/// Marks a project as in flight until dropped
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<String>>,
    project_id: String,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        set: &'a Mutex<HashSet<String>>,
        project_id: &str,
    ) -> Result<Self, AggregateError> {
        let mut projects = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !projects.insert(project_id.to_string()) {
            return Err(AggregateError::AlreadyInFlight(project_id.to_string()));
        }

        Ok(Self {
            set,
            project_id: project_id.to_string(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.project_id);
    }
}
