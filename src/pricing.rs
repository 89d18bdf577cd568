//! Per-destination trip price and duration estimate
//!
//! Prices a trip at a daily rate derived from the destination's minimum budget
//! over its minimum duration. The trip length is raised to the user's requested
//! minimum, capped at the destination's maximum, and then stretched further
//! when the resulting price falls short of the user's minimum budget and the
//! destination's range allows it (upsell adjustment).

use tracing::debug;

use crate::models::{Destination, PricingResult};
use crate::{Result, TripFinderError};

/// Stateless trip price estimator
pub struct PriceEstimator;

impl PriceEstimator {
    /// Estimate the effective trip length and total price (INR).
    ///
    /// Fails only when the destination's duration range is inverted.
    pub fn estimate(
        destination: &Destination,
        user_min_duration: u32,
        user_min_budget: u64,
    ) -> Result<PricingResult> {
        let min_duration = destination.duration_min;
        let max_duration = destination.duration_max;

        if min_duration > max_duration {
            return Err(TripFinderError::InvalidDestination {
                id: destination.id.clone(),
                min: min_duration,
                max: max_duration,
            });
        }

        let base_duration = if min_duration > 0 { min_duration } else { 1 };
        let daily_rate = destination.budget_min as f64 / f64::from(base_duration);

        let mut effective_duration = user_min_duration.max(min_duration).min(max_duration);
        let mut price = Self::price_for(daily_rate, effective_duration);

        if price < user_min_budget {
            // Infinite when the daily rate is zero, which never fits the range
            let days_needed = (user_min_budget as f64 / daily_rate).ceil();
            if days_needed <= f64::from(max_duration) {
                debug!(
                    "Upsell for {}: {} -> {} days to reach minimum budget {}",
                    destination.id, effective_duration, days_needed, user_min_budget
                );
                effective_duration = days_needed as u32;
                price = Self::price_for(daily_rate, effective_duration);
            } else {
                debug!(
                    "Minimum budget {} unreachable for {} within {} days",
                    user_min_budget, destination.id, max_duration
                );
            }
        }

        Ok(PricingResult {
            effective_duration,
            estimated_price: price,
        })
    }

    fn price_for(daily_rate: f64, days: u32) -> u64 {
        (daily_rate * f64::from(days)).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::fixtures::destination;
    use rstest::rstest;

    fn dest(budget_min: u64, duration_min: u32, duration_max: u32) -> Destination {
        let mut d = destination("d", 4.0, budget_min);
        d.budget_max = 50_000;
        d.duration_min = duration_min;
        d.duration_max = duration_max;
        d
    }

    #[rstest]
    #[case::no_upsell(5, 15_000, 5, 20_000)]
    #[case::upsell_triggers(5, 30_000, 8, 32_000)]
    #[case::upsell_unreachable(5, 100_000, 5, 20_000)]
    #[case::user_duration_inside_range(7, 0, 7, 28_000)]
    #[case::user_duration_above_range(30, 0, 10, 40_000)]
    #[case::user_duration_below_range(1, 0, 5, 20_000)]
    #[case::upsell_to_exact_max(5, 40_000, 10, 40_000)]
    fn test_estimate(
        #[case] user_min_duration: u32,
        #[case] user_min_budget: u64,
        #[case] expected_duration: u32,
        #[case] expected_price: u64,
    ) {
        let result =
            PriceEstimator::estimate(&dest(20_000, 5, 10), user_min_duration, user_min_budget)
                .unwrap();
        assert_eq!(
            result,
            PricingResult {
                effective_duration: expected_duration,
                estimated_price: expected_price,
            }
        );
    }

    #[test]
    fn test_inverted_duration_range_rejected() {
        let err = PriceEstimator::estimate(&dest(20_000, 10, 5), 5, 0).unwrap_err();
        assert!(matches!(err, TripFinderError::InvalidDestination { min: 10, max: 5, .. }));
    }

    #[test]
    fn test_zero_min_duration_uses_unit_base() {
        // daily rate = 3000 / 1
        let result = PriceEstimator::estimate(&dest(3_000, 0, 4), 2, 0).unwrap();
        assert_eq!(result.effective_duration, 2);
        assert_eq!(result.estimated_price, 6_000);
    }

    #[test]
    fn test_zero_budget_destination_skips_upsell() {
        let result = PriceEstimator::estimate(&dest(0, 3, 6), 3, 10_000).unwrap();
        assert_eq!(result.effective_duration, 3);
        assert_eq!(result.estimated_price, 0);
    }

    #[test]
    fn test_fractional_daily_rate() {
        // 10000 / 3 = 3333.33 per day
        let result = PriceEstimator::estimate(&dest(10_000, 3, 9), 4, 0).unwrap();
        assert_eq!(result.estimated_price, 13_333);

        // ceil(20000 / 3333.33) = 6 days
        let result = PriceEstimator::estimate(&dest(10_000, 3, 9), 3, 20_000).unwrap();
        assert_eq!(result.effective_duration, 6);
        assert_eq!(result.estimated_price, 20_000);
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let d = dest(20_000, 5, 10);
        let first = PriceEstimator::estimate(&d, 6, 30_000).unwrap();
        let second = PriceEstimator::estimate(&d, 6, 30_000).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duration_stays_in_range_and_upsell_never_lowers_price() {
        let d = dest(20_000, 5, 10);
        for user_duration in [0_u32, 1, 4, 5, 7, 10, 11, 365, u32::MAX] {
            let baseline = PriceEstimator::estimate(&d, user_duration, 0).unwrap();
            for user_budget in [0_u64, 10_000, 25_000, 39_999, 40_000, 40_001, 1_000_000] {
                let result = PriceEstimator::estimate(&d, user_duration, user_budget).unwrap();
                assert!((5..=10).contains(&result.effective_duration));
                assert!(result.estimated_price >= baseline.estimated_price);
            }
        }
    }
}
