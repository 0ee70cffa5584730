//! Client configuration read from the environment.

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5678";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the bills API, without trailing slash
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Read `BILLED_API_URL` and `BILLED_HTTP_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("BILLED_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = match lookup("BILLED_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid BILLED_HTTP_TIMEOUT_SECS: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BILLED_API_URL", "https://api.billed.tld/"),
            ("BILLED_HTTP_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.billed.tld");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let result = ClientConfig::from_lookup(lookup_from(&[("BILLED_HTTP_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:9000/");
        assert_eq!(config.api_base_url, "http://localhost:9000");
    }
}
