use std::{env, time::Duration};

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "GRADBOOK_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "GRADBOOK_API_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `GRADBOOK_API_BASE_URL` and `GRADBOOK_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = match lookup(BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                info!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            }
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    warn!("Invalid {TIMEOUT_VAR} value: {e}");
                    Error::Config(format!("{TIMEOUT_VAR}={raw:?}: {e}"))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(&base_url).with_timeout(timeout))
    }

    /// Join the API root and a request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ClientConfig::from_lookup(|key| match key {
            BASE_URL_VAR => Some("https://api.gradbook.test/v2/".to_string()),
            TIMEOUT_VAR => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "https://api.gradbook.test/v2");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.url_for("/admin/users"), "https://api.gradbook.test/v2/admin/users");
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = ClientConfig::from_lookup(|key| (key == TIMEOUT_VAR).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
