//! `TripFinder` - budget-aware travel destination search
//!
//! This library maps the user's INR budget/duration/interest filter onto the
//! USD wire contract of an external recommendation service, maps its answers
//! back for display, and estimates a personalized trip price per destination.

pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod mapper;
pub mod models;
pub mod planner;
pub mod pricing;
pub mod recommendation;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use config::TripFinderConfig;
pub use currency::ExchangeRate;
pub use error::TripFinderError;
pub use mapper::{RequestMapper, SearchExtras};
pub use models::{Destination, Filter, PriceDisplay, PricingResult, SortBy};
pub use planner::{DestinationDetail, TripPlanner};
pub use pricing::PriceEstimator;
pub use recommendation::{RecommendationClient, RecommendationService};
pub use session::{InMemorySessionStore, PersistentSessionStore, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripFinderError>;
