use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub data: DataSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[validate(range(min = 1))]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 80 }

/// Location of the flat-file snapshot
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DataSettings {
    #[serde(default = "default_jobs_path")]
    #[validate(length(min = 1))]
    pub jobs_path: String,
    #[serde(default = "default_providers_path")]
    #[validate(length(min = 1))]
    pub providers_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            jobs_path: default_jobs_path(),
            providers_path: default_providers_path(),
        }
    }
}

fn default_jobs_path() -> String { "data/jobs.csv".to_string() }
fn default_providers_path() -> String { "data/providers.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROVIDER_MATCH__)
    /// 5. `PORT`, for platforms that assign the listening port
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PROVIDER_MATCH__SERVER__PORT -> server.port
            .add_source(environment());

        apply_port_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PROVIDER_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn apply_port_override(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match std::env::var("PORT").ok().and_then(|port| port.trim().parse::<u16>().ok()) {
        Some(port) => builder.set_override("server.port", i64::from(port)),
        None => Ok(builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 80);
        assert_eq!(settings.data.jobs_path, "data/jobs.csv");
        assert_eq!(settings.data.providers_path, "data/providers.csv");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "full");
    }

    #[test]
    fn test_empty_data_path_fails_validation() {
        let mut settings = Settings::default();
        settings.data.jobs_path = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_workers_fails_validation() {
        let mut settings = Settings::default();
        settings.server.workers = Some(0);
        assert!(settings.validate().is_err());
    }
}
