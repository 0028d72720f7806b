//! The identity provider capability.
//!
//! The gateway only needs one thing from a provider: submit a signup
//! payload and hand back whatever came over the wire. Status handling and
//! body parsing stay in the gateway, so swapping the provider (or mocking
//! it) never touches that logic.

use crate::error::SignupError;
use crate::signup::SignupPayload;
use std::future::Future;

/// Raw response from the provider's signup endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase, when the status has one
    pub reason: Option<String>,
    /// Response body as text
    pub body: String,
}

impl ProviderResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    /// Builder: Set reason phrase
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Submits signup payloads to an identity provider.
///
/// Implementations perform exactly one outbound call per `submit` and must
/// not retry. Any response that arrives, success or not, is returned as
/// `Ok`; only transport-level faults are errors.
pub trait SignupProvider: Send + Sync {
    /// Submit `payload` to the provider.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Transport`] (or [`SignupError::Timeout`]) when
    /// no response could be obtained.
    fn submit(
        &self,
        payload: &SignupPayload,
    ) -> impl Future<Output = Result<ProviderResponse, SignupError>> + Send;
}
