//! Remote service endpoint and credential configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::result::AppResult;

/// Endpoint and credentials of the hosted backend.
///
/// Both values must be supplied explicitly (config file or environment).
/// There is no built-in fallback.
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the project, e.g. `https://abc.example.co`.
    #[serde(default)]
    pub url: Option<String>,
    /// API key sent as `apikey` and bearer token.
    #[serde(default)]
    pub service_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// A complete set of remote credentials.
#[derive(Clone)]
pub struct RemoteCredentials {
    /// Base URL without a trailing slash.
    pub url: String,
    /// API key.
    pub service_key: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Build a config from explicit values.
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            service_key: Some(service_key.into()),
            timeout_seconds: default_timeout(),
        }
    }

    /// Whether both the URL and the key are present and non-empty.
    pub fn is_complete(&self) -> bool {
        non_empty(&self.url).is_some() && non_empty(&self.service_key).is_some()
    }

    /// Emit a warning when credentials are missing. Remote calls will fail
    /// later with a configuration error.
    pub fn warn_if_incomplete(&self) {
        if non_empty(&self.url).is_none() {
            warn!("Remote URL is not configured; remote calls will fail");
        }
        if non_empty(&self.service_key).is_none() {
            warn!("Remote service key is not configured; remote calls will fail");
        }
    }

    /// Resolve the credentials, failing if either part is missing.
    pub fn credentials(&self) -> AppResult<RemoteCredentials> {
        let url = non_empty(&self.url)
            .ok_or_else(|| AppError::configuration("Remote URL is not configured"))?;
        let service_key = non_empty(&self.service_key)
            .ok_or_else(|| AppError::configuration("Remote service key is not configured"))?;
        Ok(RemoteCredentials {
            url: url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("service_key", &self.service_key.as_ref().map(|_| "****"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl std::fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("url", &self.url)
            .field("service_key", &"****")
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn default_timeout() -> u64 {
    30
}
