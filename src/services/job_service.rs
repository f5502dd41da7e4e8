use std::sync::Arc;
use thiserror::Error;
use crate::core::ProviderMatcher;
use crate::models::{Job, Preferences, Provider};
use crate::services::dataset::{DatasetError, DatasetLoader};

/// Errors that can occur while answering a job query
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Answers job and provider-ranking queries
///
/// Every call reloads the dataset; nothing derived from it outlives the call.
#[derive(Clone)]
pub struct JobService {
    loader: Arc<dyn DatasetLoader>,
}

impl JobService {
    pub fn new(loader: Arc<dyn DatasetLoader>) -> Self {
        Self { loader }
    }

    /// All jobs in the current snapshot
    pub async fn get_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        let loader = Arc::clone(&self.loader);
        let jobs = tokio::task::spawn_blocking(move || loader.load_jobs()).await??;
        Ok(jobs)
    }

    /// Providers ranked for `job_id` under `preferences`, best first
    ///
    /// Unknown jobs produce an empty list rather than an error.
    pub async fn providers_for_job(
        &self,
        job_id: &str,
        preferences: Preferences,
    ) -> Result<Vec<Provider>, ServiceError> {
        let matcher = self.load_matcher().await?;
        let ranked = matcher.rank_providers_for_job(job_id, &preferences);

        tracing::debug!(
            "Ranked {} providers for job {} (max distance {:.2} mi)",
            ranked.len(),
            job_id,
            matcher.max_distance()
        );

        Ok(ranked)
    }

    async fn load_matcher(&self) -> Result<ProviderMatcher, ServiceError> {
        let loader = Arc::clone(&self.loader);
        let matcher = tokio::task::spawn_blocking(move || -> Result<ProviderMatcher, DatasetError> {
            let jobs = loader.load_jobs()?;
            let providers = loader.load_providers()?;
            Ok(ProviderMatcher::new(jobs, providers))
        })
        .await??;

        Ok(matcher)
    }
}
