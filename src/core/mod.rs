// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use distance::{haversine_distance, max_distance};
pub use matcher::ProviderMatcher;
pub use metrics::{derive_metrics, RawMetrics};
pub use normalize::{normalize_metric, normalize_providers};
pub use ranking::{assign_ranks, competition_ranks, sort_by_score};
pub use scoring::{calculate_match_score, proximity_score};
