use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use std::str::FromStr;

use crate::error::ConfigError;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_api_url() -> String {
    "https://api.octopus.energy/v1".to_string()
}

/// Octopus API credentials and meter identifiers, from `OCTOPUS_*` variables.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    pub api_key: String,
    pub account_number: String,
    pub electricity_mpan: String,
    pub electricity_serial: String,
    pub gas_mprn: String,
    pub gas_serial: String,
}

pub(crate) fn load_api_config() -> Result<ApiConfig, ConfigError> {
    envy::prefixed("OCTOPUS_")
        .from_env::<ApiConfig>()
        .map_err(ConfigError::env_parse)
}

fn default_cache_path() -> String {
    "./consumption_data.json".to_string()
}

#[derive(Deserialize, Debug)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: String,
}

pub(crate) fn load_cache_config() -> Result<CacheConfig, ConfigError> {
    envy::prefixed("CACHE_")
        .from_env::<CacheConfig>()
        .map_err(ConfigError::env_parse)
}

fn default_page_size() -> u32 {
    1000
}

#[derive(Deserialize, Debug)]
pub struct SyncConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    // RFC 3339 instant to start syncing from; unset means the full history
    #[serde(default)]
    pub period_from: Option<String>,
}

impl SyncConfig {
    pub fn period_from(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        match &self.period_from {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| ConfigError::invalid("SYNC_PERIOD_FROM", e)),
        }
    }
}

pub(crate) fn load_sync_config() -> Result<SyncConfig, ConfigError> {
    envy::prefixed("SYNC_")
        .from_env::<SyncConfig>()
        .map_err(ConfigError::env_parse)
}
