use crate::models::{Coordinates, Job, Provider};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles
const KM_TO_MILES: f64 = 0.621371;

/// Calculate the Haversine distance between two points in miles
///
/// NaN inputs are not sanitised here and yield NaN.
#[inline]
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * KM_TO_MILES
}

/// Largest distance between any job and any provider that both have coordinates
///
/// Used as the denominator for proximity scores. Every job counts here,
/// whatever its status. Returns 0 when there is no usable pair.
pub fn max_distance(jobs: &[Job], providers: &[Provider]) -> f64 {
    let provider_points: Vec<Coordinates> = providers
        .iter()
        .filter_map(Provider::coordinates)
        .collect();

    jobs.iter()
        .filter_map(Job::coordinates)
        .flat_map(|job_point| {
            provider_points
                .iter()
                .map(move |provider_point| haversine_distance(job_point, *provider_point))
        })
        .fold(0.0, f64::max)
}
