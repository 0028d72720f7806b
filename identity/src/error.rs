//! Error types for signup delegation

use std::time::Duration;
use thiserror::Error;

/// Boxed error raised by the transport underneath a provider.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when delegating a signup to the identity provider
///
/// The gateway never retries and never turns one of these into a default
/// success. Use [`is_retryable`](Self::is_retryable) to drive a caller-side
/// retry policy.
#[derive(Debug, Error)]
pub enum SignupError {
    /// The provider answered with a non-success status
    /// (e.g. duplicate email, weak password)
    #[error("Identity provider rejected signup (status {status_code}): {reason}")]
    UpstreamRequestFailed {
        /// HTTP status code
        status_code: u16,
        /// Reason phrase for the status
        reason: String,
    },

    /// A success response whose body could not be interpreted
    #[error("Malformed identity provider response: {reason}")]
    MalformedUpstreamResponse {
        /// What was wrong with the body
        reason: String,
        /// Raw response body
        body: String,
    },

    /// The provider did not answer within the configured deadline
    #[error("Identity provider did not respond within {after:?}")]
    Timeout {
        /// Deadline that was exceeded
        after: Duration,
    },

    /// Connection, TLS or serialization failure before a response arrived
    #[error("Transport failure: {0}")]
    Transport(#[source] TransportError),
}

impl SignupError {
    /// Wrap a transport-level failure unchanged
    pub fn transport(error: impl Into<TransportError>) -> Self {
        Self::Transport(error.into())
    }

    /// Whether retrying the same request later could succeed.
    ///
    /// True for timeouts, transport faults, throttling (429) and server-side
    /// (5xx) rejections. Client-side rejections and malformed bodies are not
    /// retryable.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rendezvous_identity::SignupError;
    /// let conflict = SignupError::UpstreamRequestFailed {
    ///     status_code: 409,
    ///     reason: "Conflict".to_string(),
    /// };
    /// assert!(!conflict.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::UpstreamRequestFailed { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            Self::MalformedUpstreamResponse { .. } => false,
            Self::Timeout { .. } | Self::Transport(_) => true,
        }
    }
}

/// Errors raised while loading identity provider configuration.
///
/// These are fatal at startup; they never surface from a signup call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// An environment variable is set but cannot be used
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Variable name
        var: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
