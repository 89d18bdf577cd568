//! Personalized trip pricing shown on the destination detail view

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Destination;
use crate::currency::format_inr;

/// Estimated trip length and price for one (destination, filter) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Trip length in days
    pub effective_duration: u32,
    /// Total price in INR
    pub estimated_price: u64,
}

/// What the detail view shows in its price/duration panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceDisplay {
    /// Personalized estimate for the stored filter
    #[serde(rename_all = "camelCase")]
    Estimated { price: u64, duration: u32 },
    /// The destination's own ranges
    #[serde(rename_all = "camelCase")]
    Range {
        budget_min: u64,
        budget_max: u64,
        duration_min: u32,
        duration_max: u32,
    },
}

impl PriceDisplay {
    /// Non-personalized display built from the destination ranges
    #[must_use]
    pub fn range_of(destination: &Destination) -> Self {
        PriceDisplay::Range {
            budget_min: destination.budget_min,
            budget_max: destination.budget_max,
            duration_min: destination.duration_min,
            duration_max: destination.duration_max,
        }
    }

    /// Personalized display. A zero estimate carries no information and
    /// falls back to the ranges.
    #[must_use]
    pub fn from_pricing(destination: &Destination, pricing: PricingResult) -> Self {
        if pricing.estimated_price == 0 || pricing.effective_duration == 0 {
            return Self::range_of(destination);
        }
        PriceDisplay::Estimated {
            price: pricing.estimated_price,
            duration: pricing.effective_duration,
        }
    }

    #[must_use]
    pub fn is_estimated(&self) -> bool {
        matches!(self, PriceDisplay::Estimated { .. })
    }

    /// Panel heading for the price line
    #[must_use]
    pub fn price_label(&self) -> &'static str {
        match self {
            PriceDisplay::Estimated { .. } => "Estimated Cost",
            PriceDisplay::Range { .. } => "Budget Range",
        }
    }

    /// Panel heading for the duration line
    #[must_use]
    pub fn duration_label(&self) -> &'static str {
        match self {
            PriceDisplay::Estimated { .. } => "Your Trip Duration",
            PriceDisplay::Range { .. } => "Trip Duration",
        }
    }

    /// Format the price line, e.g. `₹32,000` or `₹20,000–₹50,000`
    #[must_use]
    pub fn format_price(&self) -> String {
        match self {
            PriceDisplay::Estimated { price, .. } => format_inr(*price),
            PriceDisplay::Range {
                budget_min,
                budget_max,
                ..
            } => {
                if budget_min == budget_max {
                    format_inr(*budget_min)
                } else {
                    format!("{}–{}", format_inr(*budget_min), format_inr(*budget_max))
                }
            }
        }
    }

    /// Format the duration line, e.g. `8 days` or `5–10 days`
    #[must_use]
    pub fn format_duration(&self) -> String {
        match self {
            PriceDisplay::Estimated { duration, .. } => format!("{duration} days"),
            PriceDisplay::Range {
                duration_min,
                duration_max,
                ..
            } => {
                if duration_min == duration_max {
                    format!("{duration_min} days")
                } else {
                    format!("{duration_min}–{duration_max} days")
                }
            }
        }
    }
}

impl fmt::Display for PriceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceDisplay::Estimated { .. } => write!(
                f,
                "{}: {} for {} (approx.)",
                self.price_label(),
                self.format_price(),
                self.format_duration()
            ),
            PriceDisplay::Range { .. } => write!(
                f,
                "{}: {}, {}",
                self.price_label(),
                self.format_price(),
                self.format_duration()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::fixtures::destination;

    #[test]
    fn test_estimated_display() {
        let dest = destination("1", 4.5, 20_000);
        let display = PriceDisplay::from_pricing(
            &dest,
            PricingResult {
                effective_duration: 8,
                estimated_price: 32_000,
            },
        );
        assert!(display.is_estimated());
        assert_eq!(
            display.to_string(),
            "Estimated Cost: ₹32,000 for 8 days (approx.)"
        );
    }

    #[test]
    fn test_zero_estimate_falls_back_to_range() {
        let dest = destination("1", 4.5, 0);
        let display = PriceDisplay::from_pricing(
            &dest,
            PricingResult {
                effective_duration: 5,
                estimated_price: 0,
            },
        );
        assert!(!display.is_estimated());
    }

    #[test]
    fn test_range_display() {
        let dest = destination("1", 4.5, 20_000);
        let display = PriceDisplay::range_of(&dest);
        assert_eq!(display.format_price(), "₹20,000–₹40,000");
        assert_eq!(display.format_duration(), "5–10 days");
        assert_eq!(display.duration_label(), "Trip Duration");
    }

    #[test]
    fn test_display_json_is_tagged() {
        let display = PriceDisplay::Estimated {
            price: 20_000,
            duration: 5,
        };
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["kind"], "estimated");
        assert_eq!(json["price"], 20_000);
    }
}
