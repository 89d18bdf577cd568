//! Translation between the INR filter/display model and the USD wire model

use serde_json::Value;
use tracing::debug;

use crate::currency::ExchangeRate;
use crate::models::{Destination, Filter};
use crate::recommendation::{RecommendationRequest, WireDestination};
use crate::{Result, TripFinderError};

/// Optional extras passed through to a ranked search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchExtras {
    pub country: Option<String>,
    pub limit: Option<u32>,
}

impl SearchExtras {
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            country: None,
            limit: Some(limit),
        }
    }
}

/// Maps filters to wire requests and wire records to display destinations
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestMapper {
    rate: ExchangeRate,
}

impl RequestMapper {
    #[must_use]
    pub fn new(rate: ExchangeRate) -> Self {
        Self { rate }
    }

    #[must_use]
    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Build the outbound request. The filter must already satisfy its
    /// invariants; no validation happens here. The single desired duration is
    /// sent as both bounds and `budget` repeats the USD maximum.
    #[must_use]
    pub fn build_request(&self, filter: &Filter, extras: Option<SearchExtras>) -> RecommendationRequest {
        let min_budget = self.rate.inr_to_usd(filter.min_budget());
        let max_budget = self.rate.inr_to_usd(filter.max_budget());
        let extras = extras.unwrap_or_default();

        debug!(
            "Converted budget INR {:?} to USD ({}, {})",
            filter.budget, min_budget, max_budget
        );

        RecommendationRequest {
            budget: max_budget,
            duration: filter.duration,
            min_budget,
            max_budget,
            min_duration: filter.duration,
            max_duration: filter.duration,
            interests: filter.interests.clone(),
            country: extras.country,
            limit: extras.limit,
        }
    }

    /// Convert one wire record to the display model. Only a missing identity
    /// or name is an error; everything else falls back to a default.
    pub fn to_display_destination(
        &self,
        record: WireDestination,
        match_reason: Option<String>,
    ) -> Result<Destination> {
        let id = identity_string(record.id.as_ref())?;
        let name = record
            .name
            .ok_or_else(|| TripFinderError::mapping(format!("Destination {id} has no name")))?;

        Ok(Destination {
            id,
            name,
            country: record.country.unwrap_or_default(),
            rating: record.rating.unwrap_or(0.0),
            reviews: record.reviews.unwrap_or(0),
            budget_min: self.rate.usd_to_inr(record.min_budget.unwrap_or(0.0)),
            budget_max: self.rate.usd_to_inr(record.max_budget.unwrap_or(0.0)),
            duration_min: record.min_duration.unwrap_or(0),
            duration_max: record.max_duration.unwrap_or(0),
            interests: split_csv(record.interests.as_deref()),
            description: record.description.unwrap_or_default(),
            image: record.image.unwrap_or_default(),
            highlights: split_csv(record.highlights.as_deref()),
            best_time: record.best_time.unwrap_or_default(),
            match_reason,
        })
    }
}

fn identity_string(id: Option<&Value>) -> Result<String> {
    match id {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(TripFinderError::mapping("Destination record has no id")),
    }
}

fn split_csv(field: Option<&str>) -> Vec<String> {
    match field {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn wire(id: Value) -> WireDestination {
        WireDestination {
            id: Some(id),
            name: Some("Goa".to_string()),
            country: Some("India".to_string()),
            rating: Some(4.6),
            reviews: Some(1_200),
            min_budget: Some(238.0),
            max_budget: Some(595.0),
            min_duration: Some(5),
            max_duration: Some(10),
            interests: Some("beach,food".to_string()),
            description: Some("Sun and sand".to_string()),
            image: None,
            highlights: Some("Baga Beach,Fort Aguada".to_string()),
            best_time: None,
        }
    }

    fn filter() -> Filter {
        Filter::new((15_000, 20_000), 5, vec!["beach".to_string(), "food".to_string()])
    }

    #[test]
    fn test_build_request() {
        let request = RequestMapper::default().build_request(&filter(), None);
        assert_eq!(request.min_budget, 179);
        assert_eq!(request.max_budget, 238);
        assert_eq!(request.budget, 238);
        assert_eq!(request.duration, 5);
        assert_eq!(request.min_duration, 5);
        assert_eq!(request.max_duration, 5);
        assert_eq!(request.interests, vec!["beach", "food"]);
        assert!(request.country.is_none());
        assert!(request.limit.is_none());
    }

    #[test]
    fn test_build_request_passes_extras() {
        let extras = SearchExtras {
            country: Some("India".to_string()),
            limit: Some(3),
        };
        let request = RequestMapper::default().build_request(&filter(), Some(extras));
        assert_eq!(request.country.as_deref(), Some("India"));
        assert_eq!(request.limit, Some(3));
    }

    #[test]
    fn test_budget_bounds_rounded_independently() {
        // 42/84 = 0.5 rounds up, 125/84 = 1.488 rounds down
        let filter = Filter::new((42, 125), 3, vec!["nature".to_string()]);
        let request = RequestMapper::default().build_request(&filter, None);
        assert_eq!((request.min_budget, request.max_budget), (1, 1));
    }

    #[test]
    fn test_to_display_destination() {
        let mapper = RequestMapper::default();
        let dest = mapper
            .to_display_destination(wire(Value::from(3)), Some("Great match".to_string()))
            .unwrap();

        assert_eq!(dest.id, "3");
        assert_eq!(dest.budget_min, 19_992);
        assert_eq!(dest.budget_max, 49_980);
        assert_eq!(dest.interests, vec!["beach", "food"]);
        assert_eq!(dest.highlights, vec!["Baga Beach", "Fort Aguada"]);
        assert_eq!(dest.image, "");
        assert_eq!(dest.best_time, "");
        assert_eq!(dest.match_reason.as_deref(), Some("Great match"));
        assert!(dest.is_ranked());
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(""), vec![])]
    #[case(Some("beach"), vec!["beach"])]
    #[case(Some("beach,food"), vec!["beach", "food"])]
    fn test_interest_splitting(#[case] raw: Option<&str>, #[case] expected: Vec<&str>) {
        let mut record = wire(Value::from(1));
        record.interests = raw.map(str::to_string);
        let dest = RequestMapper::default()
            .to_display_destination(record, None)
            .unwrap();
        assert_eq!(dest.interests, expected);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record = WireDestination {
            id: Some(Value::from("abc")),
            name: Some("Somewhere".to_string()),
            ..WireDestination::default()
        };
        let dest = RequestMapper::default()
            .to_display_destination(record, None)
            .unwrap();
        assert_eq!(dest.id, "abc");
        assert_eq!(dest.rating, 0.0);
        assert_eq!(dest.reviews, 0);
        assert_eq!(dest.budget_min, 0);
        assert!(dest.highlights.is_empty());
        assert!(!dest.is_ranked());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Value::Null))]
    #[case(Some(Value::from("")))]
    fn test_missing_identity_is_mapping_error(#[case] id: Option<Value>) {
        let mut record = wire(Value::from(1));
        record.id = id;
        let err = RequestMapper::default()
            .to_display_destination(record, None)
            .unwrap_err();
        assert!(matches!(err, TripFinderError::Mapping { .. }));
    }

    #[test]
    fn test_missing_name_is_mapping_error() {
        let mut record = wire(Value::from(1));
        record.name = None;
        assert!(
            RequestMapper::default()
                .to_display_destination(record, None)
                .is_err()
        );
    }

    #[test]
    fn test_budget_round_trip_within_one_unit() {
        let mapper = RequestMapper::default();
        let dest = mapper
            .to_display_destination(wire(Value::from(1)), None)
            .unwrap();

        let filter = Filter::new((dest.budget_min, dest.budget_max), 5, vec!["beach".to_string()]);
        let request = mapper.build_request(&filter, None);
        assert!(request.min_budget.abs_diff(238) <= 1);
        assert!(request.max_budget.abs_diff(595) <= 1);

        let back = mapper
            .to_display_destination(
                WireDestination {
                    min_budget: Some(request.min_budget as f64),
                    max_budget: Some(request.max_budget as f64),
                    ..wire(Value::from(1))
                },
                None,
            )
            .unwrap();
        let rate = mapper.rate().inr_per_usd() as u64;
        assert!(back.budget_min.abs_diff(dest.budget_min) <= rate);
        assert!(back.budget_max.abs_diff(dest.budget_max) <= rate);
    }
}
