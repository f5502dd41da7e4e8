use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both halves present and numeric. A malformed value arrives as NaN and
    /// counts as absent, while a literal 0.0 is a real coordinate.
    fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) if !lat.is_nan() && !lon.is_nan() => Some(Self::new(lat, lon)),
            _ => None,
        }
    }
}

/// Lifecycle state of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Complete,
    AwaitingMaterials,
    Scheduled,
    /// Any status string the dataset carries that we do not recognise
    Unknown(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "COMPLETE" => Self::Complete,
            "AWAITING MATERIALS" | "AWAITING_MATERIALS" => Self::AwaitingMaterials,
            "SCHEDULED" => Self::Scheduled,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Complete => "COMPLETE",
            Self::AwaitingMaterials => "AWAITING MATERIALS",
            Self::Scheduled => "SCHEDULED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Where a job takes place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationType {
    Remote,
    LocationBased,
    Unknown(String),
}

impl LocationType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "REMOTE" => Self::Remote,
            "LOCATION_BASED" => Self::LocationBased,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote => "REMOTE",
            Self::LocationBased => "LOCATION_BASED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Serialize for LocationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LocationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A scheduled or completed engagement
///
/// Timestamps that failed to parse are `None`; numeric fields that failed to
/// parse are NaN. Neither aborts loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub datetime: Option<DateTime<Utc>>,
    pub status: JobStatus,
    #[serde(default)]
    pub provider_id: Option<String>,
    pub avg_cost_per_page: f64,
    #[serde(default)]
    pub materials_turned_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub provider_rating: f64,
    pub location_type: LocationType,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Job {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    pub fn is_complete(&self) -> bool {
        self.status == JobStatus::Complete
    }

    pub fn is_location_based(&self) -> bool {
        self.location_type == LocationType::LocationBased
    }

    /// Whether this job counts towards `provider_id`'s track record
    pub fn is_completed_by(&self, provider_id: &str) -> bool {
        self.is_complete() && self.provider_id.as_deref() == Some(provider_id)
    }

    /// Hours between the job start and the return of materials
    ///
    /// `None` when either timestamp is missing or invalid.
    pub fn turnover_hours(&self) -> Option<f64> {
        let started = self.datetime?;
        let returned = self.materials_turned_in_at?;
        let millis = (returned - started).num_milliseconds();
        Some(millis as f64 / 3_600_000.0)
    }
}

/// Candidate service provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "averageCostScore", default)]
    pub average_cost_score: f64,
    #[serde(rename = "averageRatingScore", default)]
    pub average_rating_score: f64,
    #[serde(rename = "averageTurnoverTimeScore", default)]
    pub average_turnover_time_score: f64,
    #[serde(rename = "totalScore", default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl Provider {
    /// Provider with no derived metrics yet
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            average_cost_score: 0.0,
            average_rating_score: 0.0,
            average_turnover_time_score: 0.0,
            total_score: None,
            rank: None,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

/// User-tunable weights for each scoring axis
///
/// Weights are plain multipliers and need not sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub cost_weight: f64,
    pub rating_weight: f64,
    pub turnover_weight: f64,
    pub proximity_weight: f64,
}

impl Preferences {
    pub const fn uniform(weight: f64) -> Self {
        Self {
            cost_weight: weight,
            rating_weight: weight,
            turnover_weight: weight,
            proximity_weight: weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trips_known_and_unknown_values() {
        assert_eq!(JobStatus::parse("AWAITING MATERIALS"), JobStatus::AwaitingMaterials);
        assert_eq!(JobStatus::parse(" COMPLETE "), JobStatus::Complete);

        // Underscore spelling is accepted but written back with a space
        let underscored = JobStatus::parse("AWAITING_MATERIALS");
        assert_eq!(underscored, JobStatus::AwaitingMaterials);
        assert_eq!(underscored.as_str(), "AWAITING MATERIALS");

        let unknown = JobStatus::parse("CANCELLED");
        assert_eq!(unknown.as_str(), "CANCELLED");
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let provider = Provider::new("p1", "Equator", Some(Coordinates::new(0.0, 0.0)));
        assert_eq!(provider.coordinates(), Some(Coordinates::new(0.0, 0.0)));
    }

    #[test]
    fn test_nan_or_half_coordinates_are_absent() {
        let mut provider = Provider::new("p1", "Nowhere", None);
        provider.latitude = Some(10.0);
        assert!(provider.coordinates().is_none());

        provider.longitude = Some(f64::NAN);
        assert!(provider.coordinates().is_none());
    }

    #[test]
    fn test_turnover_hours() {
        let job = Job {
            id: "1".to_string(),
            datetime: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
            status: JobStatus::Complete,
            provider_id: Some("p1".to_string()),
            avg_cost_per_page: 0.1,
            materials_turned_in_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single(),
            provider_rating: 4.0,
            location_type: LocationType::Remote,
            latitude: None,
            longitude: None,
        };

        assert_eq!(job.turnover_hours(), Some(12.0));
        assert!(job.is_completed_by("p1"));
        assert!(!job.is_completed_by("p2"));
    }

    #[test]
    fn test_provider_serializes_camel_case_scores() {
        let mut provider = Provider::new("p1", "Provider A", None);
        provider.total_score = Some(1.5);

        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(json["totalScore"], 1.5);
        assert_eq!(json["averageCostScore"], 0.0);
        assert!(json.get("rank").is_none());
    }
}
