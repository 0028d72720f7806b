//! Identity provider configuration.
//!
//! Configuration is read once at startup. A missing domain or client id is a
//! fatal configuration error, never a runtime signup failure.

use crate::error::ConfigError;
use std::time::Duration;

/// Environment variable holding the provider domain
pub const DOMAIN_VAR: &str = "AUTH0_DOMAIN";
/// Environment variable holding the application client id
pub const CLIENT_ID_VAR: &str = "AUTH0_CLIENT_ID";
/// Environment variable holding the call deadline in seconds
pub const TIMEOUT_VAR: &str = "AUTH0_TIMEOUT_SECS";

/// Deadline applied to each signup call when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection details for the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Provider domain (e.g. "tenant.eu.auth0.com")
    pub domain: String,

    /// Application client identifier registered with the provider.
    pub client_id: String,

    /// Deadline for a single signup call.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl IdentityConfig {
    /// Create configuration for `domain` and `client_id`.
    #[must_use]
    pub const fn new(domain: String, client_id: String) -> Self {
        Self {
            domain,
            client_id,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-call deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `AUTH0_DOMAIN`, `AUTH0_CLIENT_ID` and the
    /// optional `AUTH0_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset
    /// or blank, and [`ConfigError::InvalidEnvValue`] if the timeout is not a
    /// positive whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingEnvVar(var))
        };

        let config = Self::new(required(DOMAIN_VAR)?, required(CLIENT_ID_VAR)?);

        match lookup(TIMEOUT_VAR) {
            None => Ok(config),
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidEnvValue {
                        var: TIMEOUT_VAR,
                        reason: format!("expected a positive number of seconds, got {raw:?}"),
                    })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
        }
    }

    /// Signup endpoint for the configured domain.
    #[must_use]
    pub fn signup_url(&self) -> String {
        format!("https://{}/dbconnections/signup", self.domain)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_loads_required_values_with_default_timeout() {
        let config = IdentityConfig::from_lookup(lookup(&[
            (DOMAIN_VAR, "tenant.auth0.com"),
            (CLIENT_ID_VAR, "abc123"),
        ]))
        .unwrap();

        assert_eq!(config.domain, "tenant.auth0.com");
        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.signup_url(), "https://tenant.auth0.com/dbconnections/signup");
    }

    #[test]
    fn test_missing_domain_is_fatal() {
        let err = IdentityConfig::from_lookup(lookup(&[(CLIENT_ID_VAR, "abc123")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(DOMAIN_VAR));
    }

    #[test]
    fn test_blank_client_id_counts_as_missing() {
        let err = IdentityConfig::from_lookup(lookup(&[
            (DOMAIN_VAR, "tenant.auth0.com"),
            (CLIENT_ID_VAR, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(CLIENT_ID_VAR));
    }

    #[test]
    fn test_timeout_override() {
        let config = IdentityConfig::from_lookup(lookup(&[
            (DOMAIN_VAR, "tenant.auth0.com"),
            (CLIENT_ID_VAR, "abc123"),
            (TIMEOUT_VAR, "3"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for raw in ["0", "-1", "soon"] {
            let err = IdentityConfig::from_lookup(lookup(&[
                (DOMAIN_VAR, "tenant.auth0.com"),
                (CLIENT_ID_VAR, "abc123"),
                (TIMEOUT_VAR, raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvValue { var: TIMEOUT_VAR, .. }));
        }
    }
}
