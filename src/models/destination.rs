//! Destination display model and result ordering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::TripFinderError;

/// A destination as shown to the user. Budget bounds are in INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub rating: f64,
    pub reviews: u32,
    /// Minimum budget in INR
    pub budget_min: u64,
    /// Maximum budget in INR
    pub budget_max: u64,
    /// Minimum trip length in days
    pub duration_min: u32,
    /// Maximum trip length in days
    pub duration_max: u32,
    pub interests: Vec<String>,
    pub description: String,
    pub image: String,
    pub highlights: Vec<String>,
    pub best_time: String,
    /// Only present on ranked recommendation results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
}

impl Destination {
    /// Whether this record came from a ranked recommendation call
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.match_reason.is_some()
    }
}

/// Result list ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep the order returned by the recommendation service
    #[default]
    Match,
    /// Highest rating first
    Rating,
    /// Cheapest minimum budget first
    Budget,
}

impl FromStr for SortBy {
    type Err = TripFinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" => Ok(SortBy::Match),
            "rating" => Ok(SortBy::Rating),
            "budget" => Ok(SortBy::Budget),
            other => Err(TripFinderError::validation(format!(
                "Unknown sort order '{other}'. Must be one of: match, rating, budget"
            ))),
        }
    }
}

/// Stable in-place sort of a result list
pub fn sort_destinations(destinations: &mut [Destination], sort_by: SortBy) {
    match sort_by {
        SortBy::Match => {}
        SortBy::Rating => destinations.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Budget => destinations.sort_by_key(|d| d.budget_min),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::destination;
    use super::*;
    use rstest::rstest;

    fn ids(destinations: &[Destination]) -> Vec<&str> {
        destinations.iter().map(|d| d.id.as_str()).collect()
    }

    fn sample() -> Vec<Destination> {
        vec![
            destination("a", 4.1, 30_000),
            destination("b", 4.8, 10_000),
            destination("c", 4.1, 20_000),
        ]
    }

    #[rstest]
    #[case(SortBy::Match, vec!["a", "b", "c"])]
    #[case(SortBy::Rating, vec!["b", "a", "c"])]
    #[case(SortBy::Budget, vec!["b", "c", "a"])]
    fn test_sort_destinations(#[case] sort_by: SortBy, #[case] expected: Vec<&str>) {
        let mut list = sample();
        sort_destinations(&mut list, sort_by);
        assert_eq!(ids(&list), expected);
    }

    #[test]
    fn test_sort_by_parsing() {
        assert_eq!("Rating".parse::<SortBy>().unwrap(), SortBy::Rating);
        assert_eq!(" budget ".parse::<SortBy>().unwrap(), SortBy::Budget);
        assert!("price".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_match_reason_omitted_when_absent() {
        let json = serde_json::to_value(destination("a", 4.0, 100)).unwrap();
        assert!(json.get("matchReason").is_none());
        assert_eq!(json["budgetMin"], 100);
    }
}
