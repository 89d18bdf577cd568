//! Configuration management for `TripFinder`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripFinderError;
use crate::currency::{DEFAULT_INR_PER_USD, ExchangeRate};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripFinderConfig {
    /// Recommendation service settings
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    /// Currency conversion settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Session store settings
    #[serde(default)]
    pub session: SessionConfig,
    /// JSON API server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Recommendation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Base URL of the recommendation API
    #[serde(default = "default_recommendation_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_recommendation_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_recommendation_max_retries")]
    pub max_retries: u32,
}

/// Currency conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Indian rupees per US dollar
    #[serde(default = "default_inr_per_usd")]
    pub inr_per_usd: f64,
}

/// Session store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Store backend (memory or persistent)
    #[serde(default = "default_session_backend")]
    pub backend: String,
    /// Directory of the persistent store
    #[serde(default = "default_session_location")]
    pub location: String,
    /// Session lifetime in hours
    #[serde(default = "default_session_ttl")]
    pub ttl_hours: u32,
}

/// JSON API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Result limit used when the client does not pass one
    #[serde(default = "default_result_limit")]
    pub default_limit: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Largest page of results the search flow returns
pub const MAX_RESULT_LIMIT: u32 = 10;

// Default value functions
fn default_recommendation_base_url() -> String {
    "http://localhost:8080/api/recommendations".to_string()
}

fn default_recommendation_timeout() -> u32 {
    30
}

fn default_recommendation_max_retries() -> u32 {
    3
}

fn default_inr_per_usd() -> f64 {
    DEFAULT_INR_PER_USD
}

fn default_session_backend() -> String {
    "memory".to_string()
}

fn default_session_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("tripfinder").join("sessions"))
        .unwrap_or_else(|| PathBuf::from(".tripfinder/sessions"))
        .to_string_lossy()
        .into_owned()
}

fn default_session_ttl() -> u32 {
    24
}

fn default_server_port() -> u16 {
    3000
}

fn default_result_limit() -> u32 {
    MAX_RESULT_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            base_url: default_recommendation_base_url(),
            timeout_seconds: default_recommendation_timeout(),
            max_retries: default_recommendation_max_retries(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            inr_per_usd: default_inr_per_usd(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            location: default_session_location(),
            ttl_hours: default_session_ttl(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            default_limit: default_result_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for TripFinderConfig {
    fn default() -> Self {
        Self {
            recommendation: RecommendationConfig::default(),
            currency: CurrencyConfig::default(),
            session: SessionConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CurrencyConfig {
    #[must_use]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::new(self.inr_per_usd)
    }
}

impl TripFinderConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        match config_path {
            Some(config_file) => {
                if !config_file.exists() {
                    return Err(TripFinderError::config(format!(
                        "Config file not found: {}",
                        config_file.display()
                    ))
                    .into());
                }
                builder = builder
                    .add_source(File::from(config_file).format(config::FileFormat::Toml));
            }
            None => {
                let config_file = Self::get_config_path()
                    .unwrap_or_else(|| PathBuf::from("config.toml"));
                builder = builder.add_source(
                    File::from(config_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // TRIPFINDER__SERVER__PORT=8081 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("TRIPFINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripFinderConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripfinder").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.recommendation.base_url.is_empty() {
            self.recommendation.base_url = default_recommendation_base_url();
        }
        if self.recommendation.timeout_seconds == 0 {
            self.recommendation.timeout_seconds = default_recommendation_timeout();
        }
        if self.session.backend.is_empty() {
            self.session.backend = default_session_backend();
        }
        if self.session.location.is_empty() {
            self.session.location = default_session_location();
        }
        if self.session.ttl_hours == 0 {
            self.session.ttl_hours = default_session_ttl();
        }
        if self.server.default_limit == 0 {
            self.server.default_limit = default_result_limit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.recommendation.timeout_seconds > 300 {
            return Err(TripFinderError::config(
                "Recommendation API timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if self.recommendation.max_retries > 10 {
            return Err(
                TripFinderError::config("Recommendation API max retries cannot exceed 10").into(),
            );
        }

        if !self.currency.inr_per_usd.is_finite() || self.currency.inr_per_usd <= 0.0 {
            return Err(TripFinderError::config("Exchange rate must be a positive number").into());
        }

        if self.session.ttl_hours > 24 * 30 {
            return Err(TripFinderError::config("Session TTL cannot exceed 30 days").into());
        }

        if !(1..=MAX_RESULT_LIMIT).contains(&self.server.default_limit) {
            return Err(TripFinderError::config(format!(
                "Default result limit must be between 1 and {MAX_RESULT_LIMIT}"
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripFinderError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripFinderError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_backends = ["memory", "persistent"];
        if !valid_backends.contains(&self.session.backend.as_str()) {
            return Err(TripFinderError::config(format!(
                "Invalid session backend '{}'. Must be one of: {}",
                self.session.backend,
                valid_backends.join(", ")
            ))
            .into());
        }

        let base_url = &self.recommendation.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(TripFinderError::config(
                "Recommendation API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
