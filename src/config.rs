//! Configuration management for Assetum

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::services::lifecycle::ESCALATION_THRESHOLD;

/// Which durable medium backs the collections
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub directory: String,
    pub key_prefix: String,
    /// Fall back to the bundled seed dataset when a blob is absent or corrupt
    pub seed_on_missing: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// When set, logs are also written to a daily-rolling file in this directory
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RentalsConfig {
    pub admin_fee: i64,
    pub default_daily_rate: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IncidentsConfig {
    /// Assessed totals strictly above this value need escalated approval
    pub escalation_threshold: i64,
    pub report_admin_fee: i64,
    pub assessment_admin_fee: i64,
    pub default_client: String,
}

/// Placeholder for a future remote backend. Not used by the local store.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub rentals: RentalsConfig,
    pub incidents: IncidentsConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // ASSETUM_STORAGE__DIRECTORY=/var/lib/assetum
            .add_source(
                Environment::with_prefix("ASSETUM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            directory: "data".to_string(),
            key_prefix: "assetum_".to_string(),
            seed_on_missing: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for RentalsConfig {
    fn default() -> Self {
        Self {
            admin_fee: 5000,
            default_daily_rate: 45000,
        }
    }
}

impl Default for IncidentsConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: ESCALATION_THRESHOLD,
            report_admin_fee: 2500,
            assessment_admin_fee: 5000,
            default_client: "Internal Fleet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.key_prefix, "assetum_");
        assert_eq!(config.incidents.escalation_threshold, 250_000);
        assert_eq!(config.rentals.admin_fee, 5000);
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = Config::builder()
            .set_override("storage.backend", "memory")
            .unwrap()
            .set_override("incidents.escalation_threshold", 100_000)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.directory, "data");
        assert_eq!(config.incidents.escalation_threshold, 100_000);
        assert_eq!(config.incidents.report_admin_fee, 2500);
    }
}
