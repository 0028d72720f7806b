//! HTTP identity provider client

use crate::{
    config::IdentityConfig,
    error::SignupError,
    provider::{ProviderResponse, SignupProvider},
    signup::SignupPayload,
};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Auth0-compatible provider speaking the `dbconnections/signup` API.
///
/// Cheap to clone: clones share one connection pool, so build one provider
/// and route every signup through it.
#[derive(Clone, Debug)]
pub struct Auth0Provider {
    client: Client,
    signup_url: String,
    timeout: Option<Duration>,
}

impl Auth0Provider {
    /// Create a provider for the configured domain.
    ///
    /// The underlying client enforces the configured timeout on each request
    /// and only speaks HTTPS to the domain.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: &IdentityConfig) -> Result<Self, SignupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .https_only(true)
            .build()
            .map_err(SignupError::transport)?;

        Ok(Self {
            client,
            signup_url: config.signup_url(),
            timeout: Some(config.timeout),
        })
    }

    /// Create a provider that POSTs to an explicit URL with a caller-supplied
    /// client. Intended for tests against a local mock server.
    #[must_use]
    pub fn with_client(client: Client, signup_url: impl Into<String>) -> Self {
        Self {
            client,
            signup_url: signup_url.into(),
            timeout: None,
        }
    }

    /// URL signup payloads are POSTed to.
    #[must_use]
    pub fn signup_url(&self) -> &str {
        &self.signup_url
    }
}

impl SignupProvider for Auth0Provider {
    fn submit(
        &self,
        payload: &SignupPayload,
    ) -> impl Future<Output = Result<ProviderResponse, SignupError>> + Send {
        let request = self.client.post(&self.signup_url).json(payload);
        let classify = move |error: reqwest::Error| match self.timeout {
            Some(after) if error.is_timeout() => SignupError::Timeout { after },
            _ => SignupError::transport(error),
        };

        async move {
            let response = request.send().await.map_err(classify)?;

            let status = response.status();
            let body = response.text().await.map_err(classify)?;

            Ok(ProviderResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                body,
            })
        }
    }
}
