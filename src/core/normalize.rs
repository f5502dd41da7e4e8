use crate::core::metrics::completed_jobs_by_provider;
use crate::models::{Job, Provider};

/// Min-max normalize one raw metric across the provider population
///
/// Only providers with at least one completed job take part in the rescale.
/// Everyone else is pinned to 0 so a missing track record is neither boosted
/// nor penalised by where 0 happens to land in the range.
///
/// When all participating providers share the same value the result is 0 if
/// that value is 0 and 1 otherwise. The returned vector is index-aligned with
/// `providers`.
pub fn normalize_metric<F>(providers: &[Provider], jobs: &[Job], selector: F) -> Vec<f64>
where
    F: Fn(&Provider) -> f64,
{
    let completed = completed_jobs_by_provider(jobs);
    let participating: Vec<bool> = providers
        .iter()
        .map(|provider| completed.contains_key(provider.id.as_str()))
        .collect();

    let values: Vec<f64> = providers
        .iter()
        .zip(&participating)
        .filter(|(_, has_jobs)| **has_jobs)
        .map(|(provider, _)| selector(provider))
        .collect();

    if values.is_empty() {
        return vec![0.0; providers.len()];
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    providers
        .iter()
        .zip(&participating)
        .map(|(provider, has_jobs)| {
            if *has_jobs {
                rescale(selector(provider), min, max)
            } else {
                0.0
            }
        })
        .collect()
}

#[inline]
fn rescale(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        if max == 0.0 { 0.0 } else { 1.0 }
    } else {
        (value - min) / (max - min)
    }
}

/// Replace raw cost and turnover with their normalized values
///
/// Rating is left as the raw mean since it already lives on a bounded scale.
pub fn normalize_providers(providers: Vec<Provider>, jobs: &[Job]) -> Vec<Provider> {
    let costs = normalize_metric(&providers, jobs, |p| p.average_cost_score);
    let turnovers = normalize_metric(&providers, jobs, |p| p.average_turnover_time_score);

    providers
        .into_iter()
        .zip(costs.into_iter().zip(turnovers))
        .map(|(provider, (cost, turnover))| Provider {
            average_cost_score: cost,
            average_turnover_time_score: turnover,
            ..provider
        })
        .collect()
}
