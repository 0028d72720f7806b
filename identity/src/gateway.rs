//! Signup delegation.
//!
//! [`SignupGateway`] turns a local [`SignupRequest`] into the provider's
//! wire payload, submits it once under a bounded deadline, and maps the
//! outcome into a [`SignupResponse`] or a [`SignupError`].
//!
//! Every failure is logged exactly once, here, and then returned unchanged.
//! The gateway holds no mutable state; one instance can serve any number of
//! concurrent signups.

use crate::{
    client::Auth0Provider,
    config::{DEFAULT_TIMEOUT, IdentityConfig},
    error::SignupError,
    provider::SignupProvider,
    signup::{SignupPayload, SignupRequest, SignupResponse},
};
use std::time::Duration;
use tracing::{debug, error};

/// Delegates account creation to an identity provider.
#[derive(Clone, Debug)]
pub struct SignupGateway<P> {
    provider: P,
    client_id: String,
    timeout: Duration,
}

impl SignupGateway<Auth0Provider> {
    /// Build an HTTP-backed gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &IdentityConfig) -> Result<Self, SignupError> {
        let provider = Auth0Provider::new(config)?;
        Ok(Self::new(provider, config.client_id.clone()).with_timeout(config.timeout))
    }
}

impl<P: SignupProvider> SignupGateway<P> {
    /// Create a gateway submitting through `provider` as `client_id`.
    #[must_use]
    pub const fn new(provider: P, client_id: String) -> Self {
        Self {
            provider,
            client_id,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the deadline for each signup call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The provider signups are submitted through.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Create an account at the identity provider.
    ///
    /// Makes exactly one provider call. Dropping the returned future
    /// abandons the call.
    ///
    /// # Errors
    ///
    /// - [`SignupError::UpstreamRequestFailed`] if the provider answers with a
    ///   non-2xx status
    /// - [`SignupError::MalformedUpstreamResponse`] if a 2xx body cannot be parsed
    /// - [`SignupError::Timeout`] if no answer arrives within the deadline
    /// - [`SignupError::Transport`] for connection or serialization faults
    #[tracing::instrument(
        name = "identity.signup",
        skip(self, request),
        fields(connection = %request.connection)
    )]
    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, SignupError> {
        let payload = SignupPayload::new(self.client_id.as_str(), request);

        let submitted = tokio::time::timeout(self.timeout, self.provider.submit(&payload)).await;
        let response = match submitted {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!(error = %err, "Identity provider signup call failed");
                return Err(err);
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                error!(timeout_ms, "Identity provider signup call timed out");
                return Err(SignupError::Timeout {
                    after: self.timeout,
                });
            }
        };

        if !response.is_success() {
            let reason = response.reason.clone().unwrap_or_default();
            error!(
                status_code = response.status,
                reason = %reason,
                "Identity provider signup failed with status code {} and reason {}",
                response.status,
                reason
            );
            return Err(SignupError::UpstreamRequestFailed {
                status_code: response.status,
                reason,
            });
        }

        match SignupResponse::from_body(&response.body) {
            Ok(parsed) => {
                debug!(user_id = %parsed.id, "Identity provider created account");
                Ok(parsed)
            }
            Err(err) => {
                error!(
                    error = %err,
                    body = %response.body,
                    "Identity provider returned an unreadable signup response"
                );
                Err(err)
            }
        }
    }
}
