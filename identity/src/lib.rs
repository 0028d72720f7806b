//! # Rendezvous Identity
//!
//! Delegates new-account creation to an external identity provider.
//!
//! ## Example
//!
//! ```no_run
//! use rendezvous_identity::{IdentityConfig, SignupGateway, SignupRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads AUTH0_DOMAIN, AUTH0_CLIENT_ID and optionally AUTH0_TIMEOUT_SECS
//!     let config = IdentityConfig::from_env()?;
//!     let gateway = SignupGateway::from_config(&config)?;
//!
//!     let account = gateway
//!         .signup(SignupRequest::new("ann@example.com", "correct horse battery"))
//!         .await?;
//!
//!     println!("Created {}", account.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `SignupProvider` capability trait, so the provider can be swapped
//! - HTTP provider over a shared, pooled `reqwest` client
//! - Bounded deadline per call, reported as a distinct `Timeout` error
//! - Case-insensitive parsing of the provider's account record
//! - `test-utils` (default): `mocks::MockSignupProvider`

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod signup;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use client::Auth0Provider;
pub use config::IdentityConfig;
pub use error::{ConfigError, SignupError};
pub use gateway::SignupGateway;
pub use provider::{ProviderResponse, SignupProvider};
pub use signup::{DEFAULT_CONNECTION, SignupPayload, SignupRequest, SignupResponse};
