//! data.gov.in MGNREGA resource client
//!
//! Cache-first access to the district monthly performance dataset. Every
//! query round-trips through the TTL cache; when the live request fails,
//! one stale read of the broad default query stands in before the error
//! surfaces. There are no retries beyond that single fallback read.

use std::time::{Duration, Instant};

use futures::future::join_all;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheStats, TtlCache};
use crate::data::{ApiResponse, District, Record};
use crate::metrics;

/// Resource endpoint of the district-wise monthly MGNREGA dataset
const DATA_GOV_BASE_URL: &str =
    "https://api.data.gov.in/resource/ee03643a-ee4c-48c2-ac30-9f2ff26ab722";

/// Hard cap on one request round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
const USER_AGENT: &str = concat!("nregadash/", env!("CARGO_PKG_VERSION"));

/// Default record cap for broad queries
pub const DEFAULT_LIMIT: u32 = 1000;

/// Record cap for single-district queries; district histories are small
const BATCH_LIMIT: u32 = 100;

/// Cache key of the unfiltered default query. This entry doubles as the
/// stale fallback read when a fetch fails.
const FALLBACK_CACHE_KEY: &str = "mgnrega_all_all_all_1000";

/// Errors surfaced when talking to the upstream API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, connection refused, offline
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// No response within the 30 second request timeout
    #[error("request timed out")]
    Timeout,

    /// Upstream replied, but outside the documented shape
    #[error("unexpected upstream response: {message}")]
    UpstreamFormat {
        /// HTTP status when the exchange got far enough to carry one
        status: Option<u16>,
        message: String,
    },

    /// Setup defect no retry can fix, such as a rejected API key
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Maps a transport error onto the taxonomy above.
fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err)
    }
}

/// Server-side filters for a records query. An empty filter asks for the
/// broad default slice of the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub district: Option<String>,
    pub state: Option<String>,
    pub fin_year: Option<String>,
    /// Record cap; [`DEFAULT_LIMIT`] when unset
    pub limit: Option<u32>,
}

impl RecordFilter {
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_fin_year(mut self, fin_year: impl Into<String>) -> Self {
        self.fin_year = Some(fin_year.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Deterministic cache key for a filter: every absent part canonicalizes
/// to `all`, and the limit is always included.
fn cache_key(filter: &RecordFilter) -> String {
    format!(
        "mgnrega_{}_{}_{}_{}",
        filter.district.as_deref().unwrap_or("all"),
        filter.state.as_deref().unwrap_or("all"),
        filter.fin_year.as_deref().unwrap_or("all"),
        filter.effective_limit()
    )
}

/// Outcome of an API reachability probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub response_time: Duration,
    pub error: Option<String>,
}

/// Client for the MGNREGA district performance dataset.
///
/// Owns the HTTP client and the response cache; constructed once at
/// startup and shared by reference for the life of the process.
#[derive(Debug)]
pub struct DataClient {
    http: Client,
    cache: TtlCache<ApiResponse>,
    base_url: String,
    api_key: String,
}

impl DataClient {
    /// Creates a client against the standard data.gov.in endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DATA_GOV_BASE_URL)
    }

    /// Creates a client against a custom endpoint (tests use this).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            // Construction only fails when no TLS backend is available,
            // the same condition Client::new() panics on.
            .expect("failed to construct HTTP client");

        Self {
            http,
            cache: TtlCache::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    #[cfg(test)]
    fn with_cache(api_key: &str, base_url: &str, cache: TtlCache<ApiResponse>) -> Self {
        let mut client = Self::with_base_url(api_key, base_url);
        client.cache = cache;
        client
    }

    /// Fetches one page of records for `filter`, serving from cache when a
    /// fresh entry exists.
    ///
    /// On a miss the live request runs once, with no retries. If it fails
    /// for any reason and a copy of the default unfiltered query is still
    /// in the cache, that copy is returned even past its TTL; filtered
    /// entries never stand in for each other. Only successful responses
    /// are cached.
    pub async fn fetch_records(&self, filter: &RecordFilter) -> Result<ApiResponse, ApiError> {
        let key = cache_key(filter);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        match self.request_records(filter).await {
            Ok(response) => {
                info!("fetched {} records for {key}", response.records.len());
                self.cache.put(&key, response.clone());
                Ok(response)
            }
            Err(err) => {
                warn!("fetch for {key} failed: {err}");
                if let Some(stale) = self.cache.peek(FALLBACK_CACHE_KEY) {
                    warn!("serving last known data for {key}");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    async fn request_records(&self, filter: &RecordFilter) -> Result<ApiResponse, ApiError> {
        let response = self
            .http
            .get(&self.base_url)
            .header(ACCEPT, "application/json")
            .query(&self.query_params(filter))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Configuration(format!(
                "API key rejected (HTTP {status})"
            )));
        }
        if !status.is_success() {
            return Err(ApiError::UpstreamFormat {
                status: Some(status.as_u16()),
                message: format!("HTTP {status}"),
            });
        }

        let text = response.text().await.map_err(classify)?;
        serde_json::from_str(&text).map_err(|err| ApiError::UpstreamFormat {
            status: Some(status.as_u16()),
            message: err.to_string(),
        })
    }

    /// Query parameters for `filter`; only present filter parts are sent.
    fn query_params(&self, filter: &RecordFilter) -> Vec<(String, String)> {
        let mut params = vec![
            ("api-key".to_string(), self.api_key.clone()),
            ("format".to_string(), "json".to_string()),
            ("limit".to_string(), filter.effective_limit().to_string()),
        ];
        if let Some(district) = &filter.district {
            params.push(("filters[district_name]".to_string(), district.clone()));
        }
        if let Some(state) = &filter.state {
            params.push(("filters[state_name]".to_string(), state.clone()));
        }
        if let Some(fin_year) = &filter.fin_year {
            params.push(("filters[fin_year]".to_string(), fin_year.clone()));
        }
        params
    }

    /// Fetches each district's recent history concurrently.
    ///
    /// Every requested district appears in the result. A district whose
    /// fetch fails maps to an empty record set instead of failing the
    /// batch, so one flaky district cannot sink a comparison.
    pub async fn fetch_districts_batch(
        &self,
        districts: &[District],
    ) -> Vec<(District, Vec<Record>)> {
        let fetches = districts.iter().map(|district| async {
            let filter = RecordFilter::default()
                .with_district(district.district_name.as_str())
                .with_state(district.state_name.as_str())
                .with_limit(BATCH_LIMIT);
            (district.clone(), self.fetch_records(&filter).await)
        });

        join_all(fetches)
            .await
            .into_iter()
            .map(|(district, result)| match result {
                Ok(response) => (district, response.records),
                Err(err) => {
                    warn!("batch fetch for {} failed: {err}", district.district_name);
                    (district, Vec::new())
                }
            })
            .collect()
    }

    /// Distinct state names across the default query, ascending.
    pub async fn available_states(&self) -> Result<Vec<String>, ApiError> {
        let response = self.fetch_records(&RecordFilter::default()).await?;
        Ok(metrics::state_names(&response.records))
    }

    /// Distinct district names within one state, ascending.
    pub async fn districts_in_state(&self, state: &str) -> Result<Vec<String>, ApiError> {
        let filter = RecordFilter::default().with_state(state);
        let response = self.fetch_records(&filter).await?;
        Ok(metrics::district_names(&response.records))
    }

    /// Distinct financial years across the default query, newest first.
    pub async fn available_financial_years(&self) -> Result<Vec<String>, ApiError> {
        let response = self.fetch_records(&RecordFilter::default()).await?;
        Ok(metrics::financial_years(&response.records))
    }

    /// The most recent monthly record for one district, if the upstream
    /// has any data for it.
    pub async fn latest_district_record(
        &self,
        district: &District,
    ) -> Result<Option<Record>, ApiError> {
        let filter = RecordFilter::default()
            .with_district(district.district_name.as_str())
            .with_state(district.state_name.as_str())
            .with_limit(BATCH_LIMIT);
        let response = self.fetch_records(&filter).await?;
        Ok(metrics::latest_record(&response.records))
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Entry count and keys currently cached.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Probes the API with a minimal request and reports reachability and
    /// round-trip time.
    pub async fn check_health(&self) -> HealthStatus {
        let started = Instant::now();
        let result = self
            .http
            .head(&self.base_url)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await;
        let response_time = started.elapsed();

        match result {
            Ok(response) if response.status().is_success() => HealthStatus {
                healthy: true,
                response_time,
                error: None,
            },
            Ok(response) => HealthStatus {
                healthy: false,
                response_time,
                error: Some(format!("HTTP {}", response.status())),
            },
            Err(err) => HealthStatus {
                healthy: false,
                response_time,
                error: Some(classify(err).to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-record response in the upstream wire shape
    const RESPONSE_FIXTURE: &str = r#"{
        "title": "District-wise MGNREGA Data at a Glance",
        "total": 2,
        "count": 2,
        "limit": "10",
        "offset": "0",
        "records": [
            {
                "fin_year": "2024-2025",
                "month": "Dec",
                "state_code": "17",
                "state_name": "MADHYA PRADESH",
                "district_code": "1752",
                "district_name": "BHOPAL",
                "Total_Individuals_Worked": "24607"
            },
            {
                "fin_year": "2024-2025",
                "month": "Nov",
                "state_code": "17",
                "state_name": "MADHYA PRADESH",
                "district_code": "1752",
                "district_name": "BHOPAL",
                "Total_Individuals_Worked": "23890"
            }
        ]
    }"#;

    fn fixture_response() -> ApiResponse {
        serde_json::from_str(RESPONSE_FIXTURE).expect("fixture parses")
    }

    /// A client pointed at a port nothing listens on, so every live
    /// request fails fast without touching the network.
    fn unreachable_client() -> DataClient {
        DataClient::with_base_url("test-key", "http://127.0.0.1:1")
    }

    fn district(state: &str, name: &str) -> District {
        District {
            state_name: state.to_string(),
            state_code: String::new(),
            district_name: name.to_string(),
            district_code: String::new(),
        }
    }

    #[test]
    fn test_cache_key_canonicalizes_missing_parts() {
        assert_eq!(cache_key(&RecordFilter::default()), "mgnrega_all_all_all_1000");

        let filter = RecordFilter::default()
            .with_district("BHOPAL")
            .with_state("MADHYA PRADESH")
            .with_fin_year("2024-2025")
            .with_limit(100);
        assert_eq!(
            cache_key(&filter),
            "mgnrega_BHOPAL_MADHYA PRADESH_2024-2025_100"
        );
    }

    #[test]
    fn test_fallback_key_is_the_default_query_key() {
        assert_eq!(cache_key(&RecordFilter::default()), FALLBACK_CACHE_KEY);
    }

    #[test]
    fn test_query_params_carry_only_present_filters() {
        let client = unreachable_client();

        let broad = client.query_params(&RecordFilter::default());
        assert!(broad.contains(&("api-key".to_string(), "test-key".to_string())));
        assert!(broad.contains(&("format".to_string(), "json".to_string())));
        assert!(broad.contains(&("limit".to_string(), "1000".to_string())));
        assert!(broad.iter().all(|(name, _)| !name.starts_with("filters[")));

        let narrowed = client.query_params(
            &RecordFilter::default()
                .with_state("MADHYA PRADESH")
                .with_fin_year("2024-2025"),
        );
        assert!(narrowed.contains(&(
            "filters[state_name]".to_string(),
            "MADHYA PRADESH".to_string()
        )));
        assert!(narrowed.contains(&(
            "filters[fin_year]".to_string(),
            "2024-2025".to_string()
        )));
        assert!(narrowed
            .iter()
            .all(|(name, _)| name != "filters[district_name]"));
    }

    #[tokio::test]
    async fn test_fresh_cache_entry_is_served_without_a_request() {
        let client = unreachable_client();
        let filter = RecordFilter::default().with_state("MADHYA PRADESH");
        client.cache.put(&cache_key(&filter), fixture_response());

        // The endpoint is unreachable, so success proves no request ran.
        let response = client.fetch_records(&filter).await.unwrap();
        assert_eq!(response, fixture_response());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_network_error() {
        let client = unreachable_client();
        let err = client
            .fetch_records(&RecordFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_failed_fetch_serves_the_default_entry_past_its_ttl() {
        // A zero TTL makes every entry stale the moment it is written.
        let cache = TtlCache::with_ttl_secs(0);
        let client = DataClient::with_cache("test-key", "http://127.0.0.1:1", cache);
        client.cache.put(FALLBACK_CACHE_KEY, fixture_response());

        let response = client
            .fetch_records(&RecordFilter::default().with_state("MADHYA PRADESH"))
            .await
            .unwrap();
        assert_eq!(response.records.len(), 2);
    }

    #[tokio::test]
    async fn test_filtered_entries_do_not_stand_in_for_each_other() {
        let client = unreachable_client();
        let cached = RecordFilter::default().with_state("MADHYA PRADESH");
        client.cache.put(&cache_key(&cached), fixture_response());

        let err = client
            .fetch_records(&RecordFilter::default().with_state("BIHAR"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_batch_maps_failed_districts_to_empty_record_sets() {
        let client = unreachable_client();
        let bhopal = district("MADHYA PRADESH", "BHOPAL");
        let cached_filter = RecordFilter::default()
            .with_district("BHOPAL")
            .with_state("MADHYA PRADESH")
            .with_limit(BATCH_LIMIT);
        client.cache.put(&cache_key(&cached_filter), fixture_response());

        let batch = client
            .fetch_districts_batch(&[bhopal, district("BIHAR", "PATNA")])
            .await;

        assert_eq!(batch.len(), 2, "failed districts keep their slot");
        assert_eq!(batch[0].0.district_name, "BHOPAL");
        assert_eq!(batch[0].1.len(), 2);
        assert_eq!(batch[1].0.district_name, "PATNA");
        assert!(batch[1].1.is_empty());
    }

    #[tokio::test]
    async fn test_latest_district_record_picks_the_newest_month() {
        let client = unreachable_client();
        let bhopal = district("MADHYA PRADESH", "BHOPAL");
        let filter = RecordFilter::default()
            .with_district("BHOPAL")
            .with_state("MADHYA PRADESH")
            .with_limit(BATCH_LIMIT);
        client.cache.put(&cache_key(&filter), fixture_response());

        let latest = client.latest_district_record(&bhopal).await.unwrap().unwrap();
        assert_eq!(latest.month, "Dec");
    }

    #[tokio::test]
    async fn test_listing_helpers_compose_the_default_query() {
        let client = unreachable_client();
        client.cache.put(FALLBACK_CACHE_KEY, fixture_response());

        let states = client.available_states().await.unwrap();
        assert_eq!(states, vec!["MADHYA PRADESH"]);

        let years = client.available_financial_years().await.unwrap();
        assert_eq!(years, vec!["2024-2025"]);
    }

    #[tokio::test]
    async fn test_clear_cache_forgets_cached_responses() {
        let client = unreachable_client();
        client.cache.put(FALLBACK_CACHE_KEY, fixture_response());
        assert_eq!(client.cache_stats().entries, 1);

        client.clear_cache();
        assert_eq!(client.cache_stats().entries, 0);
        assert!(client
            .fetch_records(&RecordFilter::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_health_check_reports_an_unreachable_api() {
        let status = unreachable_client().check_health().await;
        assert!(!status.healthy);
        assert!(status.error.is_some());
    }
}
