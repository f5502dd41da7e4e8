use crate::core::{
    distance::max_distance,
    metrics::derive_metrics,
    normalize::normalize_providers,
    ranking::{assign_ranks, sort_by_score},
    scoring::calculate_match_score,
};
use crate::models::{Job, Preferences, Provider};

/// Ranking orchestrator over one snapshot of the dataset
///
/// # Pipeline Stages
/// 1. Raw metrics from each provider's completed jobs
/// 2. Min-max normalization of cost and turnover
/// 3. Dataset-wide proximity bound
/// 4. Per-job scoring and stable ranking
///
/// A matcher is built per request and never reused, so metrics always reflect
/// the full job history as loaded.
#[derive(Debug, Clone)]
pub struct ProviderMatcher {
    jobs: Vec<Job>,
    providers: Vec<Provider>,
    max_distance: f64,
}

impl ProviderMatcher {
    /// Derive and normalize provider metrics from the raw snapshot
    pub fn new(jobs: Vec<Job>, mut providers: Vec<Provider>) -> Self {
        derive_metrics(&mut providers, &jobs);
        let providers = normalize_providers(providers, &jobs);
        let max_distance = max_distance(&jobs, &providers);

        tracing::debug!(
            "Prepared {} providers against {} jobs (max distance {:.2} mi)",
            providers.len(),
            jobs.len(),
            max_distance
        );

        Self::from_parts(jobs, providers, max_distance)
    }

    /// Assemble a matcher from providers whose metrics are already final
    pub fn from_parts(jobs: Vec<Job>, providers: Vec<Provider>, max_distance: f64) -> Self {
        Self {
            jobs,
            providers,
            max_distance,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn find_job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    /// Score every provider for a job and return them best first
    ///
    /// An unknown job id yields an empty list. Ties keep input order and share
    /// a competition rank.
    pub fn rank_providers_for_job(&self, job_id: &str, preferences: &Preferences) -> Vec<Provider> {
        let Some(job) = self.find_job(job_id) else {
            tracing::debug!("Job {} not found, no providers to rank", job_id);
            return Vec::new();
        };

        let mut ranked: Vec<Provider> = self
            .providers
            .iter()
            .map(|provider| Provider {
                total_score: Some(calculate_match_score(job, provider, preferences, self.max_distance)),
                ..provider.clone()
            })
            .collect();

        sort_by_score(&mut ranked);
        assign_ranks(&mut ranked);

        ranked
    }
}
