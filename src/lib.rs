//! Provider Match - weighted provider ranking service
//!
//! Ranks service providers for a job by combining normalized cost, raw rating,
//! normalized turnover time and geographic proximity into a single score.
//! Provider metrics are derived from each provider's completed job history in a
//! flat-file dataset that is reloaded on every query.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProviderMatcher, distance::{haversine_distance, max_distance}};
pub use models::{Coordinates, Job, JobStatus, LocationType, Preferences, Provider};
pub use services::{CsvDataset, DatasetLoader, JobService};
