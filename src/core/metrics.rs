use std::collections::HashMap;
use crate::models::{Job, Provider};

/// Unnormalized averages over one provider's completed jobs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMetrics {
    pub cost: f64,
    pub rating: f64,
    pub turnover: f64,
}

/// Group completed, assigned jobs by provider id
pub fn completed_jobs_by_provider(jobs: &[Job]) -> HashMap<&str, Vec<&Job>> {
    let mut grouped: HashMap<&str, Vec<&Job>> = HashMap::new();
    for job in jobs.iter().filter(|job| job.is_complete()) {
        if let Some(provider_id) = job.provider_id.as_deref() {
            grouped.entry(provider_id).or_default().push(job);
        }
    }
    grouped
}

/// A single job's turnover contribution: `1 / hours` for a positive
/// turnaround, otherwise 0
#[inline]
pub fn turnover_contribution(job: &Job) -> f64 {
    match job.turnover_hours() {
        Some(hours) if hours > 0.0 => 1.0 / hours,
        _ => 0.0,
    }
}

/// Averages over a provider's completed jobs
///
/// Cost is inverted (`1 - mean`) so cheaper providers score higher. It is not
/// clamped and goes negative once the mean cost per page exceeds 1.
pub fn raw_metrics(completed: &[&Job]) -> RawMetrics {
    if completed.is_empty() {
        return RawMetrics::default();
    }

    RawMetrics {
        cost: 1.0 - mean(completed.iter().map(|job| job.avg_cost_per_page)),
        rating: mean(completed.iter().map(|job| job.provider_rating)),
        turnover: mean(completed.iter().map(|job| turnover_contribution(job))),
    }
}

/// Annotate every provider with raw metrics derived from the full job list
///
/// Providers without completed jobs keep zero metrics.
pub fn derive_metrics(providers: &mut [Provider], jobs: &[Job]) {
    let completed = completed_jobs_by_provider(jobs);

    for provider in providers.iter_mut() {
        let metrics = completed
            .get(provider.id.as_str())
            .map(|jobs| raw_metrics(jobs))
            .unwrap_or_default();

        provider.average_cost_score = metrics.cost;
        provider.average_rating_score = metrics.rating;
        provider.average_turnover_time_score = metrics.turnover;
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
