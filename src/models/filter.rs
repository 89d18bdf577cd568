//! Search filter chosen by the user

use serde::{Deserialize, Serialize};

use crate::{Result, TripFinderError};

/// Session key under which the latest filter snapshot is stored
pub const FILTER_SESSION_KEY: &str = "travelFilters";

/// Budget/duration/interest filter for one search. Amounts are in INR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Budget range in INR as `[min, max]`
    pub budget: (u64, u64),
    /// Desired trip length in days
    pub duration: u32,
    /// Interest tags in the order the user picked them
    pub interests: Vec<String>,
}

impl Filter {
    /// Create a new filter
    #[must_use]
    pub fn new(budget: (u64, u64), duration: u32, interests: Vec<String>) -> Self {
        Self {
            budget,
            duration,
            interests,
        }
    }

    #[must_use]
    pub fn min_budget(&self) -> u64 {
        self.budget.0
    }

    #[must_use]
    pub fn max_budget(&self) -> u64 {
        self.budget.1
    }

    /// Check the filter invariants before anything is dispatched
    pub fn validate(&self) -> Result<()> {
        if self.budget.0 > self.budget.1 {
            return Err(TripFinderError::validation(format!(
                "Minimum budget {} exceeds maximum budget {}",
                self.budget.0, self.budget.1
            )));
        }

        if self.duration == 0 {
            return Err(TripFinderError::validation(
                "Trip duration must be at least 1 day",
            ));
        }

        if self.interests.is_empty() {
            return Err(TripFinderError::validation(
                "At least one interest is required",
            ));
        }

        Ok(())
    }

    /// Serialize the snapshot stored in the session
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored snapshot. A snapshot missing its budget pair or any
    /// other field is a mapping failure.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| TripFinderError::mapping(format!("Malformed filter snapshot: {e}")))
    }
}
