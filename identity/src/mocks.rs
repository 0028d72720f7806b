//! Mock identity provider for testing.

use crate::error::SignupError;
use crate::provider::{ProviderResponse, SignupProvider};
use crate::signup::SignupPayload;
use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
enum Scripted {
    Respond(ProviderResponse),
    Fail(io::ErrorKind),
}

/// Mock signup provider.
///
/// Replays scripted outcomes in order and records every payload it was
/// given. When the script runs out it keeps answering with `200` and a
/// generated account for the submitted email.
#[derive(Debug, Clone, Default)]
pub struct MockSignupProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    submitted: Arc<Mutex<Vec<SignupPayload>>>,
    delay: Option<Duration>,
}

impl MockSignupProvider {
    /// Create a mock provider that accepts every signup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    #[must_use]
    pub fn with_response(self, response: ProviderResponse) -> Self {
        self.push(Scripted::Respond(response));
        self
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn with_transport_failure(self, kind: io::ErrorKind) -> Self {
        self.push(Scripted::Fail(kind));
        self
    }

    /// Wait this long before answering each submission.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Payloads submitted so far, oldest first.
    #[must_use]
    pub fn submitted(&self) -> Vec<SignupPayload> {
        self.submitted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn push(&self, outcome: Scripted) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }

    fn next_outcome(&self, payload: &SignupPayload) -> Scripted {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| {
                let body = serde_json::json!({
                    "_id": format!("mock|{}", payload.email),
                    "email_verified": false,
                    "email": payload.email,
                });
                Scripted::Respond(ProviderResponse::new(200, body.to_string()).with_reason("OK"))
            })
    }
}

impl SignupProvider for MockSignupProvider {
    fn submit(
        &self,
        payload: &SignupPayload,
    ) -> impl Future<Output = Result<ProviderResponse, SignupError>> + Send {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(payload.clone());
        }
        let outcome = self.next_outcome(payload);
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            match outcome {
                Scripted::Respond(response) => Ok(response),
                Scripted::Fail(kind) => Err(SignupError::transport(io::Error::new(
                    kind,
                    "mock transport failure",
                ))),
            }
        }
    }
}
