//! Configuration for the signal gateway.
//!
//! Loaded once at startup from YAML, with `${VAR}` and `${VAR:-default}`
//! environment interpolation, then validated and converted into the
//! immutable runtime values the pipeline runs with.
//!
//! ```yaml
//! server:
//!   http_port: 8080
//!   webhook_path: /webhook
//! venue:
//!   environment: ${BYBIT_ENVIRONMENT:-testnet}
//!   category: spot
//!   api_key: ${BYBIT_API_KEY:-}
//!   api_secret: ${BYBIT_API_SECRET:-}
//! credentials:
//!   source: request_or_configured
//! policy:
//!   validation:
//!     mode: notional_floor
//!     min_order_value: ${MIN_ORDER_VALUE:-15}
//!   buy_quantity_unit: base
//! ```

mod policy;
mod server;
mod venue;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::use_cases::PipelineSettings;
use crate::domain::{BuyQuantityUnit, CredentialSource, MarketCategory};

pub use policy::{PolicyConfig, ValidationConfig};
pub use server::ServerConfig;
pub use venue::{CredentialsConfig, VenueConfig};

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Trading venue.
    #[serde(default)]
    pub venue: VenueConfig,
    /// Credential strategy.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Order policy.
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Settings for the submit pipeline.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            policy: self.policy.order_policy(),
            credentials: self.credentials.credential_config(&self.venue),
            category: self.venue.category,
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `path` defaults to [`DEFAULT_CONFIG_PATH`].
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. An unset or empty
/// variable without a default becomes the empty string.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !config.server.webhook_path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "server.webhook_path must start with '/', got '{}'",
            config.server.webhook_path
        )));
    }

    if config.server.webhook_path == "/health" {
        return Err(ConfigError::ValidationError(
            "server.webhook_path must not be /health".to_string(),
        ));
    }

    for (name, value) in config.policy.thresholds() {
        if value < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "policy.validation.{name} must not be negative"
            )));
        }
    }

    if config.policy.buy_quantity_unit == BuyQuantityUnit::Quote
        && config.venue.category != MarketCategory::Spot
    {
        return Err(ConfigError::ValidationError(
            "policy.buy_quantity_unit 'quote' requires venue.category 'spot'".to_string(),
        ));
    }

    if config.credentials.source == CredentialSource::Configured
        && config.venue.configured_credentials().is_none()
    {
        return Err(ConfigError::ValidationError(
            "credentials.source 'configured' requires venue.api_key and venue.api_secret"
                .to_string(),
        ));
    }

    if config.venue.request_timeout_ms == Some(0) {
        return Err(ConfigError::ValidationError(
            "venue.request_timeout_ms must be positive when set".to_string(),
        ));
    }

    Ok(())
}
