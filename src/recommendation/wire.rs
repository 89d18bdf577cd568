//! JSON shapes exchanged with the recommendation service. Amounts are USD.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One destination as returned by the recommendation service.
///
/// Every field is optional so that a drifting upstream schema degrades to
/// defaults during mapping instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDestination {
    /// Numeric or string identity
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub reviews: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_duration: Option<u32>,
    /// Comma-joined tags, e.g. `"beach,food"`
    #[serde(default, deserialize_with = "comma_joined")]
    pub interests: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    /// Comma-joined highlights
    #[serde(default, deserialize_with = "comma_joined")]
    pub highlights: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub best_time: Option<String>,
}

/// A value of the wrong shape becomes `None` instead of an error
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(T::deserialize(raw).ok())
}

/// Accepts `"a,b"` or `["a", "b"]`; anything else becomes `None`
fn comma_joined<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let joined = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    };
    Ok(joined)
}

/// Decode each element on its own, dropping the ones that do not fit `T`
pub fn decode_each<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Skipping unreadable {} at index {}: {}", what, index, e);
                None
            }
        })
        .collect()
}

fn skip_unreadable<'de, D>(deserializer: D) -> Result<Vec<RankedDestination>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(decode_each(items, "recommendation"))
}

/// Body of `POST /` on the recommendation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Scoring scalar, equal to `max_budget`
    pub budget: u64,
    /// Scoring duration in days
    pub duration: u32,
    pub min_budget: u64,
    pub max_budget: u64,
    pub min_duration: u32,
    pub max_duration: u32,
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One ranked entry of a recommendation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDestination {
    pub destination: WireDestination,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response of `POST /` on the recommendation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default, deserialize_with = "skip_unreadable")]
    pub recommendations: Vec<RankedDestination>,
}
