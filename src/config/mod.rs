//! Configuration management module.
//!
//! Supports loading configuration from:
//! - A `.env` file in the working directory
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `DATAGEN_WORKER__<SECTION>__<KEY>` pattern

mod dataset;
mod server;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::locale::Locale;
use crate::service::catalog::DEFAULT_MAX_ATTEMPTS;

pub use dataset::DatasetConfig;
pub use server::ServerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Generator limits and defaults.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Locale dataset configuration.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{DATAGEN_PROFILE}.toml` (if `DATAGEN_PROFILE` is set)
    /// 3. Environment variables with `DATAGEN_WORKER__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let profile =
            std::env::var("DATAGEN_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // DATAGEN_WORKER__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("DATAGEN_WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.generator.validate()?;
        self.dataset.validate()?;

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be 'text' or 'json', got '{}'",
                self.observability.log_format
            )));
        }

        Ok(())
    }
}

/// Generator limits and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Locale used when a request names none.
    #[serde(default)]
    pub default_locale: Locale,

    /// Upper bound of `count` and `iterations` per request.
    #[serde(default = "default_max_count")]
    pub max_count: u32,

    /// Retry cap of rejection-sampled identifiers (Denmark CPR).
    #[serde(default = "default_checksum_max_attempts")]
    pub checksum_max_attempts: u32,
}

const fn default_max_count() -> u32 {
    1000
}

const fn default_checksum_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            max_count: default_max_count(),
            checksum_max_attempts: default_checksum_max_attempts(),
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_count == 0 {
            return Err(ConfigError::Message(
                "generator.max_count cannot be 0".to_string(),
            ));
        }
        if self.checksum_max_attempts == 0 {
            return Err(ConfigError::Message(
                "generator.checksum_max_attempts cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable the Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
