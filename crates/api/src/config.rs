//! Environment-driven client configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL of the workflow service.
pub const API_BASE_ENV: &str = "FORMRUN_API_BASE";
/// Set to `1`/`true` to allow plain `http://` for non-local hosts.
pub const ALLOW_INSECURE_ENV: &str = "FORMRUN_ALLOW_INSECURE";
/// Connect timeout in whole seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "FORMRUN_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Hostnames allowed to use any scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid FORMRUN_API_BASE URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("FORMRUN_API_BASE must include a host")]
    MissingHost,
    #[error("FORMRUN_API_BASE must use http or https; got '{0}://'")]
    UnsupportedScheme(String),
    #[error("FORMRUN_API_BASE must use https for non-localhost hosts; set FORMRUN_ALLOW_INSECURE=1 to override")]
    InsecureScheme,
    #[error("FORMRUN_CONNECT_TIMEOUT_SECS must be a whole number of seconds; got '{0}'")]
    InvalidTimeout(String),
}

/// Settings for [`crate::FormrunClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Validated base URL without a trailing slash.
    pub base_url: String,
    pub allow_insecure: bool,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            allow_insecure: false,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read configuration from `FORMRUN_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let allow_insecure = env::var(ALLOW_INSECURE_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let connect_timeout = match env::var(CONNECT_TIMEOUT_ENV) {
            Ok(raw) => {
                let seconds = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Duration::from_secs(seconds)
            }
            Err(_) => Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let base_url = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Self {
            base_url,
            allow_insecure,
            connect_timeout,
        }
        .validated()
    }

    /// Replace the base URL, re-validating it.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self {
            base_url: base_url.into(),
            ..self
        }
        .validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        validate_base_url(&self.base_url, self.allow_insecure)?;
        let trimmed_len = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed_len);
        Ok(self)
    }
}

/// Rules:
/// - scheme must be `http` or `https`
/// - localhost: either scheme
/// - otherwise: `https`, unless `allow_insecure`
fn validate_base_url(base: &str, allow_insecure: bool) -> Result<(), ConfigError> {
    let parsed = Url::parse(base).map_err(|error| ConfigError::InvalidBaseUrl {
        url: base.to_string(),
        reason: error.to_string(),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
    }

    let host_name = parsed.host_str().ok_or(ConfigError::MissingHost)?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if scheme != "https" && !allow_insecure {
        return Err(ConfigError::InsecureScheme);
    }

    Ok(())
}
