use crate::core::distance::haversine_distance;
use crate::models::{Job, Preferences, Provider};

/// Calculate the weighted match score of a provider for a job
///
/// Scoring formula:
/// score = (
///     cost_score * cost_weight +           # normalized, cheaper = higher
///     rating_score * rating_weight +       # raw mean rating
///     turnover_score * turnover_weight +   # normalized, faster = higher
///     proximity_score * proximity_weight   # closer = higher
/// )
///
/// The total is not bounded; weights act as plain multipliers.
pub fn calculate_match_score(
    job: &Job,
    provider: &Provider,
    preferences: &Preferences,
    max_distance: f64,
) -> f64 {
    let cost_score = provider.average_cost_score * preferences.cost_weight;
    let rating_score = provider.average_rating_score * preferences.rating_weight;
    let turnover_score = provider.average_turnover_time_score * preferences.turnover_weight;
    let proximity = proximity_score(job, provider, max_distance) * preferences.proximity_weight;

    cost_score + rating_score + turnover_score + proximity
}

/// Closeness in [0, 1] relative to the dataset-wide maximum distance
///
/// Zero unless the job is location based and both sides carry coordinates.
#[inline]
pub fn proximity_score(job: &Job, provider: &Provider, max_distance: f64) -> f64 {
    if !job.is_location_based() {
        return 0.0;
    }

    let (Some(job_point), Some(provider_point)) = (job.coordinates(), provider.coordinates()) else {
        return 0.0;
    };

    if max_distance > 0.0 {
        let distance = haversine_distance(job_point, provider_point);
        (max_distance - distance) / max_distance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, JobStatus, LocationType};

    fn create_test_job(location_type: LocationType, coordinates: Option<Coordinates>) -> Job {
        Job {
            id: "1".to_string(),
            datetime: None,
            status: JobStatus::Scheduled,
            provider_id: Some("provider1".to_string()),
            avg_cost_per_page: 0.10,
            materials_turned_in_at: None,
            provider_rating: 4.5,
            location_type,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
        }
    }

    fn create_test_provider(coordinates: Option<Coordinates>) -> Provider {
        let mut provider = Provider::new("1", "Provider A", coordinates);
        provider.average_cost_score = 0.9;
        provider.average_rating_score = 0.5;
        provider.average_turnover_time_score = 1.0;
        provider
    }

    const LOS_ANGELES: Coordinates = Coordinates::new(34.0522, -118.2437);

    #[test]
    fn test_calculate_match_score() {
        let job = create_test_job(LocationType::LocationBased, Some(LOS_ANGELES));
        let provider = create_test_provider(Some(LOS_ANGELES));

        let score = calculate_match_score(&job, &provider, &Preferences::uniform(1.0), 100.0);

        assert!((score - 3.4).abs() < 1e-9, "Expected 3.4, got {}", score);
    }

    #[test]
    fn test_remote_job_has_no_proximity() {
        let job = create_test_job(LocationType::Remote, Some(LOS_ANGELES));
        let provider = create_test_provider(Some(LOS_ANGELES));

        assert_eq!(proximity_score(&job, &provider, 100.0), 0.0);

        let score = calculate_match_score(&job, &provider, &Preferences::uniform(1.0), 100.0);
        assert!((score - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_missing_coordinates_have_no_proximity() {
        let job = create_test_job(LocationType::LocationBased, None);
        let provider = create_test_provider(Some(LOS_ANGELES));
        assert_eq!(proximity_score(&job, &provider, 100.0), 0.0);

        let job = create_test_job(LocationType::LocationBased, Some(LOS_ANGELES));
        let provider = create_test_provider(None);
        assert_eq!(proximity_score(&job, &provider, 100.0), 0.0);
    }

    #[test]
    fn test_zero_max_distance_has_no_proximity() {
        let job = create_test_job(LocationType::LocationBased, Some(LOS_ANGELES));
        let provider = create_test_provider(Some(LOS_ANGELES));
        assert_eq!(proximity_score(&job, &provider, 0.0), 0.0);
    }

    #[test]
    fn test_equator_coordinates_are_eligible() {
        let origin = Coordinates::new(0.0, 0.0);
        let job = create_test_job(LocationType::LocationBased, Some(origin));
        let provider = create_test_provider(Some(origin));
        assert_eq!(proximity_score(&job, &provider, 50.0), 1.0);
    }

    #[test]
    fn test_weights_scale_linearly() {
        let job = create_test_job(LocationType::LocationBased, Some(LOS_ANGELES));
        let provider = create_test_provider(Some(LOS_ANGELES));

        let single = calculate_match_score(&job, &provider, &Preferences::uniform(1.0), 100.0);
        let triple = calculate_match_score(&job, &provider, &Preferences::uniform(3.0), 100.0);
        assert!((triple - 3.0 * single).abs() < 1e-9);

        let cost_only = Preferences {
            cost_weight: 1.0,
            ..Preferences::default()
        };
        assert!((calculate_match_score(&job, &provider, &cost_only, 100.0) - 0.9).abs() < 1e-12);
    }
}
