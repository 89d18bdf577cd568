//! Recommendation service integration
//!
//! The ranking itself is owned by an external service. This module defines the
//! wire contract, the `RecommendationService` port the rest of the crate talks
//! to, and the HTTP client implementing it.

pub mod client;
pub mod wire;

use async_trait::async_trait;

use crate::Result;

pub use client::RecommendationClient;
pub use wire::{RankedDestination, RecommendationRequest, RecommendationResponse, WireDestination};

/// Port to the external recommendation service. Values are USD on this side.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// `GET /destinations`
    async fn list_all(&self) -> Result<Vec<WireDestination>>;

    /// `GET /destinations/{id}`; `Ok(None)` when the service reports not-found
    async fn get_by_id(&self, id: &str) -> Result<Option<WireDestination>>;

    /// `POST /` with a ranked-search request
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse>;
}
