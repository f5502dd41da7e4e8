// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, Job, JobStatus, LocationType, Preferences, Provider};
pub use requests::ProvidersQuery;
pub use responses::{ErrorResponse, HealthResponse};
