//! Client configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};
use crate::types::DEFAULT_ISSUER;

/// Configuration shared by the attribute and authorization services.
///
/// ```toml
/// issuer = "esgf-pyclient"
/// timeout_secs = 30
/// attribute_service_url = "https://idp.example.org/esgf-idp/saml/soap/secure/attributeService.htm"
/// authorization_service_url = "https://data.example.org/esgf-orp/saml/soap/secure/authorizationService.htm"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Issuer written into attribute queries.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Request timeout in seconds; `0` or `None` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// Endpoint of the attribute service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_service_url: Option<String>,

    /// Endpoint of the authorization service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_service_url: Option<String>,
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

#[allow(clippy::unnecessary_wraps)]
const fn default_timeout_secs() -> Option<u64> {
    Some(30)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            timeout_secs: default_timeout_secs(),
            attribute_service_url: None,
            authorization_service_url: None,
        }
    }
}

impl ClientConfig {
    /// Parses configuration from TOML.
    pub fn from_toml_str(content: &str) -> SamlResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SamlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SamlError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the attribute service URL or a configuration error.
    pub fn require_attribute_service_url(&self) -> SamlResult<&str> {
        self.attribute_service_url
            .as_deref()
            .ok_or_else(|| SamlError::Config("attribute_service_url is not set".to_string()))
    }

    /// Returns the authorization service URL or a configuration error.
    pub fn require_authorization_service_url(&self) -> SamlResult<&str> {
        self.authorization_service_url.as_deref().ok_or_else(|| {
            SamlError::Config("authorization_service_url is not set".to_string())
        })
    }
}
