use serde::{Deserialize, Serialize};
use crate::models::domain::Preferences;

/// Query string for the ranked providers endpoint
///
/// Weights are kept as raw strings so that a value which is not a number
/// falls back to a zero weight instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersQuery {
    #[serde(rename = "costWeight")]
    pub cost_weight: Option<String>,
    #[serde(rename = "ratingWeight")]
    pub rating_weight: Option<String>,
    #[serde(rename = "turnoverWeight")]
    pub turnover_weight: Option<String>,
    #[serde(rename = "proximityWeight")]
    pub proximity_weight: Option<String>,
}

impl ProvidersQuery {
    /// Builds the query from raw `key=value` pairs. When a weight is repeated
    /// the first occurrence wins; unrelated keys are ignored.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "costWeight" => &mut query.cost_weight,
                "ratingWeight" => &mut query.rating_weight,
                "turnoverWeight" => &mut query.turnover_weight,
                "proximityWeight" => &mut query.proximity_weight,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.as_ref().to_string());
        }

        query
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            cost_weight: parse_weight(self.cost_weight.as_deref()),
            rating_weight: parse_weight(self.rating_weight.as_deref()),
            turnover_weight: parse_weight(self.turnover_weight.as_deref()),
            proximity_weight: parse_weight(self.proximity_weight.as_deref()),
        }
    }
}

fn parse_weight(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|weight| weight.is_finite())
        .unwrap_or(0.0)
}
