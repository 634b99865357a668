//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (JOKEBOOK_*)
//! 2. TOML config file (if JOKEBOOK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (JOKEBOOK_*)
/// 2. TOML config file (if JOKEBOOK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite jokebook database.
    ///
    /// Set via JOKEBOOK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the external joke provider.
    ///
    /// Set via JOKEBOOK_PROVIDER_BASE_URL environment variable.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// User-Agent string for provider requests.
    ///
    /// Set via JOKEBOOK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Provider request timeout in milliseconds.
    ///
    /// Set via JOKEBOOK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How many jokes to request from the provider on a cache miss.
    ///
    /// Set via JOKEBOOK_IMPORT_AMOUNT environment variable.
    #[serde(default = "default_import_amount")]
    pub import_amount: u8,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./jokebook.sqlite")
}

fn default_provider_base_url() -> String {
    "https://v2.jokeapi.dev/joke".into()
}

fn default_user_agent() -> String {
    "mcp-jokebook/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_import_amount() -> u8 {
    3
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            provider_base_url: default_provider_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            import_amount: default_import_amount(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `JOKEBOOK_`
    /// 2. TOML file from `JOKEBOOK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("JOKEBOOK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("JOKEBOOK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
