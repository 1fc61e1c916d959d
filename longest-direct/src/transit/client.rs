//! transport.rest HTTP client.
//!
//! Provides async methods for the three endpoints the finder needs:
//! station search, departures board and trip details. The API needs no key
//! but is rate limited, so in-flight requests are bounded by a semaphore.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::TransitError;
use super::provider::{DepartureQuery, TransitProvider};
use super::types::{DepartureDto, DeparturesResponse, StationSearchResponse, TripDto, TripResponse};

/// Default base URL for the transit API.
pub const DEFAULT_BASE_URL: &str = "https://v6.db.transport.rest";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Language for names and remarks.
const LANGUAGE: &str = "de";

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Timeout for station searches in seconds
    pub search_timeout_secs: u64,
    /// Timeout for departures and trip requests in seconds
    pub board_timeout_secs: u64,
}

impl TransitConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            search_timeout_secs: 10,
            board_timeout_secs: 20,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeouts.
    pub fn with_timeouts(mut self, search_secs: u64, board_secs: u64) -> Self {
        self.search_timeout_secs = search_secs;
        self.board_timeout_secs = board_secs;
        self
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// transport.rest API client.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: Url,
    semaphore: Arc<Semaphore>,
    search_timeout: Duration,
    board_timeout: Duration,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| TransitError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransitError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            board_timeout: Duration::from_secs(config.board_timeout_secs),
        })
    }

    /// Build an endpoint URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransitError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransitError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, TransitError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransitError::ClientClosed)?;

        debug!(%url, "transit request");

        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("language", LANGUAGE)])
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TransitProvider for TransitClient {
    async fn search_stations(&self, query: &str) -> Result<StationSearchResponse, TransitError> {
        let url = self.endpoint(&["stations"])?;
        let params = [
            ("query", query.to_string()),
            ("limit", "1".to_string()),
            ("completion", "true".to_string()),
            ("fuzzy", "true".to_string()),
        ];

        self.get_json(url, &params, self.search_timeout).await
    }

    async fn departures(
        &self,
        station_id: &str,
        query: &DepartureQuery,
    ) -> Result<Vec<DepartureDto>, TransitError> {
        let url = self.endpoint(&["stops", station_id, "departures"])?;
        let params = query.to_query_pairs();

        let response: DeparturesResponse = self.get_json(url, &params, self.board_timeout).await?;
        Ok(response.into_departures())
    }

    async fn trip(&self, trip_id: &str) -> Result<TripDto, TransitError> {
        let url = self.endpoint(&["trips", trip_id])?;
        let params = [
            ("stopovers", "true".to_string()),
            ("remarks", "false".to_string()),
            ("polyline", "false".to_string()),
        ];

        let response: TripResponse = self.get_json(url, &params, self.board_timeout).await?;
        Ok(response.into_trip())
    }
}
