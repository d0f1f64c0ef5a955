//! Venue and credential settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{CredentialConfig, CredentialSource, Credentials, MarketCategory};
use crate::infrastructure::venue::bybit::{BybitConfig, BybitEnvironment};

/// Venue configuration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Mainnet or testnet.
    #[serde(default)]
    pub environment: BybitEnvironment,
    /// Base URL replacing the environment's.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Market segment for orders and price lookups.
    #[serde(default)]
    pub category: MarketCategory,
    /// Client-side request timeout. Absent means none.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// Configured API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Configured API secret.
    #[serde(default)]
    pub api_secret: Option<String>,
}

impl VenueConfig {
    /// Adapter settings for this venue section.
    #[must_use]
    pub fn bybit_config(&self) -> BybitConfig {
        let mut config = BybitConfig::new(self.environment);
        if let Some(url) = self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(ms) = self.request_timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }

    /// The configured credential pair, if both halves are set.
    #[must_use]
    pub fn configured_credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.api_key.as_deref(), self.api_secret.as_deref())
    }
}

impl std::fmt::Debug for VenueConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("category", &self.category)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Credential strategy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Where the signing pair comes from.
    #[serde(default)]
    pub source: CredentialSource,
}

impl CredentialsConfig {
    /// Combine the strategy with the venue section's configured pair.
    #[must_use]
    pub fn credential_config(&self, venue: &VenueConfig) -> CredentialConfig {
        CredentialConfig::new(self.source, venue.configured_credentials())
    }
}
