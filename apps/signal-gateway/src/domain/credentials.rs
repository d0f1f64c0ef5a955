//! Venue API credentials and where they come from.

use serde::{Deserialize, Serialize};

/// Venue API key pair.
///
/// Both halves are redacted from `Debug` output so a credential never reaches
/// a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Build credentials from optional parts, requiring both to be non-blank.
    ///
    /// Values are stored exactly as given.
    #[must_use]
    pub fn from_parts(api_key: Option<&str>, api_secret: Option<&str>) -> Option<Self> {
        let api_key = api_key.filter(|k| !k.trim().is_empty())?;
        let api_secret = api_secret.filter(|s| !s.trim().is_empty())?;
        Some(Self::new(api_key.to_string(), api_secret.to_string()))
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Where the credential pair for an order is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// Only `api_key`/`secret` carried in the signal.
    Request,
    /// Only the pair from process configuration; signal keys are ignored.
    Configured,
    /// The signal's pair when present, otherwise the configured one.
    #[default]
    RequestOrConfigured,
}

impl CredentialSource {
    /// Get the source name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Configured => "configured",
            Self::RequestOrConfigured => "request_or_configured",
        }
    }
}

/// Credential strategy plus the configured pair, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct CredentialConfig {
    /// Resolution strategy.
    pub source: CredentialSource,
    /// Pair from process configuration, if any.
    pub configured: Option<Credentials>,
}

impl CredentialConfig {
    /// Create a credential configuration.
    #[must_use]
    pub const fn new(source: CredentialSource, configured: Option<Credentials>) -> Self {
        Self { source, configured }
    }

    /// Pick the pair to sign with, given what the signal carried.
    #[must_use]
    pub fn resolve(&self, from_request: Option<Credentials>) -> Option<Credentials> {
        match self.source {
            CredentialSource::Request => from_request,
            CredentialSource::Configured => self.configured.clone(),
            CredentialSource::RequestOrConfigured => {
                from_request.or_else(|| self.configured.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str) -> Credentials {
        Credentials::new(key.to_string(), format!("{key}-secret"))
    }

    #[test]
    fn debug_output_is_redacted() {
        let creds = Credentials::new("my-key".to_string(), "my-secret".to_string());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn from_parts_requires_both_halves() {
        assert!(Credentials::from_parts(Some("k"), Some("s")).is_some());
        assert!(Credentials::from_parts(Some("k"), None).is_none());
        assert!(Credentials::from_parts(None, Some("s")).is_none());
        assert!(Credentials::from_parts(Some("  "), Some("s")).is_none());
    }

    #[test]
    fn from_parts_keeps_surrounding_whitespace() {
        let creds = Credentials::from_parts(Some(" key"), Some("secret ")).unwrap();
        assert_eq!(creds.api_key(), " key");
        assert_eq!(creds.api_secret(), "secret ");
    }

    #[test]
    fn request_source_ignores_configuration() {
        let config = CredentialConfig::new(CredentialSource::Request, Some(pair("cfg")));
        assert_eq!(config.resolve(None), None);
        assert_eq!(config.resolve(Some(pair("req"))), Some(pair("req")));
    }

    #[test]
    fn configured_source_ignores_request() {
        let config = CredentialConfig::new(CredentialSource::Configured, Some(pair("cfg")));
        assert_eq!(config.resolve(Some(pair("req"))), Some(pair("cfg")));
    }

    #[test]
    fn request_or_configured_prefers_request() {
        let config =
            CredentialConfig::new(CredentialSource::RequestOrConfigured, Some(pair("cfg")));
        assert_eq!(config.resolve(Some(pair("req"))), Some(pair("req")));
        assert_eq!(config.resolve(None), Some(pair("cfg")));

        let empty = CredentialConfig::default();
        assert_eq!(empty.resolve(None), None);
    }

    #[test]
    fn source_serde() {
        let parsed: CredentialSource = serde_json::from_str("\"request_or_configured\"").unwrap();
        assert_eq!(parsed, CredentialSource::RequestOrConfigured);
        assert_eq!(CredentialSource::Configured.as_str(), "configured");
    }
}
