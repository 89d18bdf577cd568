//! HTTP client for the recommendation service
//!
//! Wraps `reqwest` in retry middleware so transient failures (connect errors,
//! 5xx, 429) are retried with exponential backoff before surfacing as
//! `Transport` errors.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::wire::decode_each;
use super::{RecommendationRequest, RecommendationResponse, RecommendationService, WireDestination};
use crate::config::RecommendationConfig;
use crate::{Result, TripFinderError};

/// Recommendation service client
pub struct RecommendationClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl RecommendationClient {
    /// Create a new client from configuration
    pub fn new(config: &RecommendationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripFinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripFinderError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn destinations_url(&self) -> String {
        format!("{}/destinations", self.base_url)
    }

    fn destination_url(&self, id: &str) -> String {
        format!("{}/destinations/{}", self.base_url, urlencoding::encode(id))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| TripFinderError::transport(format!("Failed to read {what} body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| TripFinderError::mapping(format!("Failed to parse {what}: {e}")))
    }

    async fn status_error(response: reqwest::Response, what: &str) -> TripFinderError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!("Recommendation service returned {} for {}", status, what);
        TripFinderError::transport_status(
            format!("Recommendation service error {status} for {what}: {error_text}"),
            status.as_u16(),
        )
    }
}

#[async_trait]
impl RecommendationService for RecommendationClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<WireDestination>> {
        let url = self.destinations_url();
        debug!("Listing destinations from {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripFinderError::transport(format!("Destination listing failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "destination listing").await);
        }

        let items: Vec<Value> = Self::read_json(response, "destination listing").await?;
        let destinations: Vec<WireDestination> = decode_each(items, "destination");

        info!(
            "Listed {} destinations in {:.3}s",
            destinations.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(destinations)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<WireDestination>> {
        let url = self.destination_url(id);
        debug!("Fetching destination from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripFinderError::transport(format!("Destination fetch failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            info!("Destination {} not found", id);
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::status_error(response, "destination fetch").await);
        }

        let destination = Self::read_json(response, "destination").await?;
        Ok(Some(destination))
    }

    #[instrument(skip(self, request), fields(interests = request.interests.len(), limit = ?request.limit))]
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        debug!("Requesting recommendations: {:?}", request);
        let start_time = Instant::now();

        let body = serde_json::to_vec(request)?;
        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TripFinderError::transport(format!("Recommendation request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "recommendations").await);
        }

        let recommendations: RecommendationResponse =
            Self::read_json(response, "recommendations").await?;

        info!(
            "Received {} recommendations in {:.3}s",
            recommendations.recommendations.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(recommendations)
    }
}
