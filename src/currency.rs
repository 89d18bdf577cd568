//! INR/USD conversion shared by both mapping directions.

use serde::{Deserialize, Serialize};

/// Indian rupees per US dollar used when no override is configured
pub const DEFAULT_INR_PER_USD: f64 = 84.0;

/// Fixed multiplicative exchange rate. Amounts are rounded to the nearest
/// integer at the point of conversion, each bound independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    inr_per_usd: f64,
}

impl ExchangeRate {
    #[must_use]
    pub fn new(inr_per_usd: f64) -> Self {
        Self { inr_per_usd }
    }

    #[must_use]
    pub fn inr_per_usd(&self) -> f64 {
        self.inr_per_usd
    }

    /// Outbound direction: divide by the rate.
    #[must_use]
    pub fn inr_to_usd(&self, inr: u64) -> u64 {
        round_amount(inr as f64 / self.inr_per_usd)
    }

    /// Inbound direction: multiply by the rate.
    #[must_use]
    pub fn usd_to_inr(&self, usd: f64) -> u64 {
        round_amount(usd * self.inr_per_usd)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::new(DEFAULT_INR_PER_USD)
    }
}

// Negative and NaN amounts collapse to zero.
fn round_amount(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

/// Format an INR amount with Indian digit grouping, e.g. `₹1,50,000`.
#[must_use]
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(15_000, 179)]
    #[case(20_000, 238)]
    #[case(42, 1)]
    #[case(41, 0)]
    #[case(0, 0)]
    fn test_inr_to_usd_rounds_to_nearest(#[case] inr: u64, #[case] usd: u64) {
        assert_eq!(ExchangeRate::default().inr_to_usd(inr), usd);
    }

    #[test]
    fn test_usd_to_inr() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.usd_to_inr(500.0), 42_000);
        assert_eq!(rate.usd_to_inr(0.5), 42);
        assert_eq!(rate.usd_to_inr(-3.0), 0);
    }

    #[test]
    fn test_inr_round_trip_drifts_less_than_one_usd() {
        let rate = ExchangeRate::default();
        for inr in [0_u64, 1, 41, 42, 43, 15_000, 20_000, 99_999, 1_234_567] {
            let back = rate.usd_to_inr(rate.inr_to_usd(inr) as f64);
            let drift = back.abs_diff(inr) as f64;
            assert!(drift <= rate.inr_per_usd() / 2.0, "inr={inr} back={back}");
        }
    }

    #[test]
    fn test_usd_round_trip_is_exact_for_whole_dollars() {
        let rate = ExchangeRate::default();
        for usd in [0_u64, 1, 179, 238, 5_000] {
            assert_eq!(rate.inr_to_usd(rate.usd_to_inr(usd as f64)), usd);
        }
    }

    #[rstest]
    #[case(0, "₹0")]
    #[case(999, "₹999")]
    #[case(1_000, "₹1,000")]
    #[case(20_000, "₹20,000")]
    #[case(150_000, "₹1,50,000")]
    #[case(12_345_678, "₹1,23,45,678")]
    fn test_format_inr(#[case] amount: u64, #[case] expected: &str) {
        assert_eq!(format_inr(amount), expected);
    }
}
