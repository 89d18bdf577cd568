//! Search, results and destination-detail flows
//!
//! Each flow performs at most one call to the recommendation service and runs
//! the mapper/estimator over the answer. Service and mapping failures degrade
//! to empty results or a not-found state instead of propagating.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::config::MAX_RESULT_LIMIT;
use crate::mapper::{RequestMapper, SearchExtras};
use crate::models::{
    Destination, FILTER_SESSION_KEY, Filter, PriceDisplay, SortBy, sort_destinations,
};
use crate::pricing::PriceEstimator;
use crate::recommendation::{RecommendationService, WireDestination};
use crate::session::{SessionStore, session_key};
use crate::{Result, TripFinderError};

/// Number of destinations on the home page's popular list
pub const POPULAR_DESTINATION_COUNT: usize = 3;

/// Destination detail with its price panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDetail {
    pub destination: Destination,
    pub pricing: PriceDisplay,
}

/// Orchestrates the user flows over injected service and session ports
pub struct TripPlanner {
    service: Arc<dyn RecommendationService>,
    sessions: Arc<dyn SessionStore>,
    mapper: RequestMapper,
}

impl TripPlanner {
    pub fn new(
        service: Arc<dyn RecommendationService>,
        sessions: Arc<dyn SessionStore>,
        mapper: RequestMapper,
    ) -> Self {
        Self {
            service,
            sessions,
            mapper,
        }
    }

    /// Validate a filter and store it as the session's search snapshot.
    /// Invalid filters are rejected before anything is stored or dispatched.
    #[instrument(skip(self, filter))]
    pub async fn submit_search(&self, session_id: &str, filter: &Filter) -> Result<()> {
        filter.validate()?;
        let key = session_key(session_id, FILTER_SESSION_KEY);
        self.sessions.set(&key, filter.to_json()?).await?;
        info!(
            "Stored search filter: budget {:?}, {} days, {} interests",
            filter.budget,
            filter.duration,
            filter.interests.len()
        );
        Ok(())
    }

    /// Read the session's search snapshot, if one was stored
    pub async fn stored_filter(&self, session_id: &str) -> Result<Option<Filter>> {
        let key = session_key(session_id, FILTER_SESSION_KEY);
        match self.sessions.get(&key).await? {
            Some(raw) => Filter::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Result list for the session: ranked recommendations when a filter is
    /// stored, otherwise the first `limit` destinations of the plain listing.
    #[instrument(skip(self))]
    pub async fn results(
        &self,
        session_id: &str,
        limit: u32,
        sort_by: SortBy,
    ) -> Result<Vec<Destination>> {
        if !(1..=MAX_RESULT_LIMIT).contains(&limit) {
            return Err(TripFinderError::validation(format!(
                "Limit must be between 1 and {MAX_RESULT_LIMIT}, got {limit}"
            )));
        }

        let mut destinations = match self.stored_filter(session_id).await {
            Ok(Some(filter)) => self.recommend(&filter, limit).await,
            Ok(None) => self.list(limit).await,
            Err(e) => {
                error!("Failed to read stored search filter: {}", e);
                Vec::new()
            }
        };

        sort_destinations(&mut destinations, sort_by);
        Ok(destinations)
    }

    /// Destination detail with personalized pricing when a filter is stored.
    /// `None` means the destination could not be loaded.
    #[instrument(skip(self))]
    pub async fn destination_detail(
        &self,
        session_id: &str,
        id: &str,
    ) -> Option<DestinationDetail> {
        let record = match self.service.get_by_id(id).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                error!("Error fetching destination {}: {}", id, e);
                return None;
            }
        };

        let destination = match self.mapper.to_display_destination(record, None) {
            Ok(destination) => destination,
            Err(e) => {
                error!("Error mapping destination {}: {}", id, e);
                return None;
            }
        };

        let pricing = match self.stored_filter(session_id).await {
            Ok(Some(filter)) => Self::personalized_pricing(&destination, &filter),
            Ok(None) => PriceDisplay::range_of(&destination),
            Err(e) => {
                warn!("Ignoring unreadable search filter: {}", e);
                PriceDisplay::range_of(&destination)
            }
        };

        Some(DestinationDetail {
            destination,
            pricing,
        })
    }

    /// Highest-rated destinations of the plain listing
    #[instrument(skip(self))]
    pub async fn popular(&self, count: usize) -> Vec<Destination> {
        let mut destinations = match self.service.list_all().await {
            Ok(records) => records
                .into_iter()
                .filter_map(|record| self.map_record(record, None))
                .collect(),
            Err(e) => {
                error!("Error fetching popular destinations: {}", e);
                Vec::new()
            }
        };

        sort_destinations(&mut destinations, SortBy::Rating);
        destinations.truncate(count);
        destinations
    }

    fn personalized_pricing(destination: &Destination, filter: &Filter) -> PriceDisplay {
        match PriceEstimator::estimate(destination, filter.duration, filter.min_budget()) {
            Ok(pricing) => {
                debug!("Estimated pricing for {}: {:?}", destination.id, pricing);
                PriceDisplay::from_pricing(destination, pricing)
            }
            Err(e) => {
                warn!("Error calculating dynamic price: {}", e);
                PriceDisplay::range_of(destination)
            }
        }
    }

    async fn recommend(&self, filter: &Filter, limit: u32) -> Vec<Destination> {
        let request = self
            .mapper
            .build_request(filter, Some(SearchExtras::with_limit(limit)));

        match self.service.recommend(&request).await {
            Ok(response) => response
                .recommendations
                .into_iter()
                .filter_map(|ranked| self.map_record(ranked.destination, ranked.reason))
                .collect(),
            Err(e) => {
                error!("Error fetching recommendations: {}", e);
                Vec::new()
            }
        }
    }

    async fn list(&self, limit: u32) -> Vec<Destination> {
        match self.service.list_all().await {
            Ok(records) => records
                .into_iter()
                .filter_map(|record| self.map_record(record, None))
                .take(limit as usize)
                .collect(),
            Err(e) => {
                error!("Error fetching destinations: {}", e);
                Vec::new()
            }
        }
    }

    fn map_record(&self, record: WireDestination, reason: Option<String>) -> Option<Destination> {
        match self.mapper.to_display_destination(record, reason) {
            Ok(destination) => Some(destination),
            Err(e) => {
                warn!("Skipping destination record: {}", e);
                None
            }
        }
    }
}
