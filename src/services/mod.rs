// Service exports
pub mod dataset;
pub mod job_service;

pub use dataset::{CsvDataset, DatasetError, DatasetLoader};
pub use job_service::{JobService, ServiceError};
