use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::{Job, JobStatus, LocationType, Provider};

/// Errors that can occur while reading the dataset snapshot
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Source of job and provider records
///
/// Malformed fields in a record never fail a load: numbers degrade to NaN and
/// timestamps to `None`. Only an unreadable source is an error.
pub trait DatasetLoader: Send + Sync {
    fn load_jobs(&self) -> Result<Vec<Job>, DatasetError>;
    fn load_providers(&self) -> Result<Vec<Provider>, DatasetError>;
}

/// Flat-file dataset made of a jobs CSV and a providers CSV
#[derive(Debug, Clone)]
pub struct CsvDataset {
    jobs_path: PathBuf,
    providers_path: PathBuf,
}

/// Raw row of the jobs file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JobRecord {
    id: String,
    datetime: String,
    status: String,
    provider_id: String,
    avg_cost_per_page: String,
    materials_turned_in_at: String,
    provider_rating: String,
    location_type: String,
    latitude: String,
    longitude: String,
}

/// Raw row of the providers file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderRecord {
    id: String,
    full_name: String,
    latitude: String,
    longitude: String,
}

impl CsvDataset {
    pub fn new(jobs_path: impl Into<PathBuf>, providers_path: impl Into<PathBuf>) -> Self {
        Self {
            jobs_path: jobs_path.into(),
            providers_path: providers_path.into(),
        }
    }

    pub fn jobs_path(&self) -> &Path {
        &self.jobs_path
    }

    pub fn providers_path(&self) -> &Path {
        &self.providers_path
    }
}

impl DatasetLoader for CsvDataset {
    fn load_jobs(&self) -> Result<Vec<Job>, DatasetError> {
        let jobs: Vec<Job> = read_records::<JobRecord>(&self.jobs_path)?
            .into_iter()
            .map(JobRecord::into_job)
            .collect();

        tracing::debug!("Loaded {} jobs from {}", jobs.len(), self.jobs_path.display());
        Ok(jobs)
    }

    fn load_providers(&self) -> Result<Vec<Provider>, DatasetError> {
        let providers: Vec<Provider> = read_records::<ProviderRecord>(&self.providers_path)?
            .into_iter()
            .map(ProviderRecord::into_provider)
            .collect();

        tracing::debug!("Loaded {} providers from {}", providers.len(), self.providers_path.display());
        Ok(providers)
    }
}

fn read_records<T>(path: &Path) -> Result<Vec<T>, DatasetError>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

impl JobRecord {
    fn into_job(self) -> Job {
        Job {
            datetime: parse_timestamp(&self.datetime),
            status: JobStatus::parse(&self.status),
            provider_id: non_empty(self.provider_id),
            avg_cost_per_page: parse_number(&self.avg_cost_per_page),
            materials_turned_in_at: parse_timestamp(&self.materials_turned_in_at),
            // A blank rating means "not rated"
            provider_rating: if self.provider_rating.is_empty() {
                0.0
            } else {
                parse_number(&self.provider_rating)
            },
            location_type: LocationType::parse(&self.location_type),
            latitude: parse_optional_number(&self.latitude),
            longitude: parse_optional_number(&self.longitude),
            id: self.id,
        }
    }
}

impl ProviderRecord {
    fn into_provider(self) -> Provider {
        let mut provider = Provider::new(self.id, self.full_name, None);
        provider.latitude = parse_optional_number(&self.latitude);
        provider.longitude = parse_optional_number(&self.longitude);
        provider
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Parse a number, degrading to NaN instead of failing
fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Blank is absent; anything else that fails to parse is NaN
fn parse_optional_number(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(parse_number(raw))
    }
}

/// Accepts RFC 3339 or naive `YYYY-MM-DD[ HH:MM[:SS]]` timestamps, the latter
/// read as UTC. Blank or unrecognised input is `None`.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
