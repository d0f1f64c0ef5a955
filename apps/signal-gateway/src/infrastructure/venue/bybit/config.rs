//! Bybit adapter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bybit deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BybitEnvironment {
    /// Production (real funds).
    Mainnet,
    /// Testnet (simulated funds).
    #[default]
    Testnet,
}

impl BybitEnvironment {
    /// Get the REST base URL.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.bybit.com",
            Self::Testnet => "https://api-testnet.bybit.com",
        }
    }

    /// Check if this is the production venue.
    #[must_use]
    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    /// Get the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl std::fmt::Display for BybitEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the Bybit venue adapter.
#[derive(Debug, Clone, Default)]
pub struct BybitConfig {
    /// Venue environment.
    pub environment: BybitEnvironment,
    /// Base URL replacing the environment's, e.g. a local mock.
    pub base_url: Option<String>,
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl BybitConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(environment: BybitEnvironment) -> Self {
        Self {
            environment,
            base_url: None,
            timeout: None,
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map_or(self.environment.base_url(), |url| url.trim_end_matches('/'))
    }
}
