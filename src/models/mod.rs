//! Data models for the `TripFinder` library
//!
//! - Filter: the user's budget/duration/interest search snapshot
//! - Destination: display model for one destination, plus result ordering
//! - Pricing: personalized price estimate and its display form

pub mod destination;
pub mod filter;
pub mod pricing;

pub use destination::{Destination, SortBy, sort_destinations};
pub use filter::{FILTER_SESSION_KEY, Filter};
pub use pricing::{PriceDisplay, PricingResult};
