//! Explicit client configuration.
//!
//! A [`Configuration`] is handed to [`crate::Client::new`] at construction
//! time. Nothing is read from ambient state after that, so several clients
//! pointed at different tenants can live in one process.

use std::fmt;
use std::time::Duration;

use crate::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_BASE_URL: &str = "SAIL_BASE_URL";
const ENV_ACCESS_TOKEN: &str = "SAIL_ACCESS_TOKEN";
const ENV_TIMEOUT_SECS: &str = "SAIL_TIMEOUT_SECS";

/// Connection settings for one tenant.
#[derive(Clone)]
pub struct Configuration {
    /// Tenant API root, e.g. `https://acme.api.identitynow.com`.
    pub base_url: String,
    /// Bearer token sent with every request. `None` sends no auth header.
    pub access_token: Option<String>,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Configuration {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sailpoint-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a configuration from `SAIL_BASE_URL`, `SAIL_ACCESS_TOKEN` and
    /// `SAIL_TIMEOUT_SECS`. Only the base URL is required.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(Error::MissingConfiguration(ENV_BASE_URL))?;
        let mut config = Self::new(base_url.trim());

        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            if !token.trim().is_empty() {
                config = config.with_access_token(token.trim());
            }
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|val| val.trim().parse::<u64>().ok())
        {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = Configuration::new("https://acme.api.identitynow.com/");
        assert_eq!(config.base_url, "https://acme.api.identitynow.com");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let config = Configuration::new("https://example.com").with_access_token("s3cret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn env_requires_base_url() {
        let err =
            Configuration::from_lookup(lookup(&[("SAIL_ACCESS_TOKEN", "tok")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration("SAIL_BASE_URL")));

        let err = Configuration::from_lookup(lookup(&[("SAIL_BASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));
    }

    #[test]
    fn env_reads_all_settings() {
        let config = Configuration::from_lookup(lookup(&[
            ("SAIL_BASE_URL", "https://acme.api.identitynow.com/"),
            ("SAIL_ACCESS_TOKEN", " tok "),
            ("SAIL_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://acme.api.identitynow.com");
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn env_ignores_blank_token() {
        let config = Configuration::from_lookup(lookup(&[
            ("SAIL_BASE_URL", "https://example.com"),
            ("SAIL_ACCESS_TOKEN", " \t "),
        ]))
        .unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn env_bad_timeout_keeps_default() {
        let config = Configuration::from_lookup(lookup(&[
            ("SAIL_BASE_URL", "https://example.com"),
            ("SAIL_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn independent_configurations() {
        let a = Configuration::new("https://a.example.com").with_timeout(Duration::from_secs(5));
        let b = Configuration::new("https://b.example.com");
        assert_eq!(a.timeout, Duration::from_secs(5));
        assert_eq!(b.timeout, DEFAULT_TIMEOUT);
        assert_ne!(a.base_url, b.base_url);
    }
}
