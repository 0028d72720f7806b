//! Signup request, wire payload and response types

use crate::error::SignupError;
use rendezvous_core::{User, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Connection used when the caller does not name one
pub const DEFAULT_CONNECTION: &str = "Username-Password-Authentication";

// ============================================================================
// Request
// ============================================================================

/// A local request to create an account at the identity provider
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Email address for the new account
    pub email: String,
    /// Initial password
    pub password: String,
    /// Provider connection (authentication strategy) to create the account in
    pub connection: String,
    /// Username, for connections that require one
    pub username: Option<String>,
    /// Given name
    pub given_name: Option<String>,
    /// Family name
    pub family_name: Option<String>,
    /// Full name
    pub name: Option<String>,
    /// Nickname
    pub nickname: Option<String>,
    /// Picture URL
    pub picture: Option<String>,
    /// Free-form metadata stored with the account
    pub user_metadata: Option<BTreeMap<String, String>>,
}

impl SignupRequest {
    /// Create a request against the default connection
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            connection: DEFAULT_CONNECTION.to_string(),
            username: None,
            given_name: None,
            family_name: None,
            name: None,
            nickname: None,
            picture: None,
            user_metadata: None,
        }
    }

    /// Builder: Set connection
    #[must_use]
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    /// Builder: Set username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder: Set given and family name
    #[must_use]
    pub fn with_names(
        mut self,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        self.given_name = Some(given_name.into());
        self.family_name = Some(family_name.into());
        self
    }

    /// Builder: Set full name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: Set nickname
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Builder: Set picture URL
    #[must_use]
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Builder: Add a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("connection", &self.connection)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Wire payload
// ============================================================================

/// Body POSTed to the provider's signup endpoint
///
/// Optional profile fields are omitted when unset, so a minimal request
/// serialises to exactly `{client_id, email, password, connection}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupPayload {
    /// Application client identifier registered with the provider
    pub client_id: String,
    /// Email address
    pub email: String,
    /// Initial password
    pub password: String,
    /// Provider connection
    pub connection: String,
    /// Username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Picture URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Account metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<BTreeMap<String, String>>,
}

impl SignupPayload {
    /// Build the wire payload for `request` under `client_id`
    #[must_use]
    pub fn new(client_id: impl Into<String>, request: SignupRequest) -> Self {
        Self {
            client_id: client_id.into(),
            email: request.email,
            password: request.password,
            connection: request.connection,
            username: request.username,
            given_name: request.given_name,
            family_name: request.family_name,
            name: request.name,
            nickname: request.nickname,
            picture: request.picture,
            user_metadata: request.user_metadata,
        }
    }
}

impl fmt::Debug for SignupPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupPayload")
            .field("client_id", &self.client_id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Response
// ============================================================================

/// Account record returned by the provider after a successful signup
///
/// Field names are matched case-insensitively when parsing; see
/// [`SignupResponse::from_body`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Provider-issued user identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Whether the email address has been verified
    #[serde(
        rename(serialize = "emailVerified", deserialize = "emailverified"),
        alias = "emailVerified",
        alias = "email_verified",
        default
    )]
    pub email_verified: bool,
    /// Email address
    pub email: String,
    /// Username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Given name
    #[serde(
        rename(serialize = "givenName", deserialize = "givenname"),
        alias = "givenName",
        alias = "given_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub given_name: Option<String>,
    /// Family name
    #[serde(
        rename(serialize = "familyName", deserialize = "familyname"),
        alias = "familyName",
        alias = "family_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub family_name: Option<String>,
    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Picture URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl SignupResponse {
    /// Parse a provider response body.
    ///
    /// Object keys are lower-cased before matching, so `EmailVerified`,
    /// `emailVerified` and `emailverified` are all accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::MalformedUpstreamResponse`] if the body is not a
    /// JSON object, lacks `_id` or `email`, or carries an empty `_id`.
    pub fn from_body(body: &str) -> Result<Self, SignupError> {
        let malformed = |reason: String| SignupError::MalformedUpstreamResponse {
            reason,
            body: body.to_string(),
        };

        let value: Value = serde_json::from_str(body)
            .map_err(|e| malformed(format!("body is not JSON: {e}")))?;

        let Value::Object(fields) = value else {
            return Err(malformed("body is not a JSON object".to_string()));
        };

        let normalized: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        let response: Self = serde_json::from_value(Value::Object(normalized))
            .map_err(|e| malformed(e.to_string()))?;

        if response.id.trim().is_empty() {
            return Err(malformed("empty _id".to_string()));
        }

        Ok(response)
    }

    /// Convert the provider record into a domain user.
    ///
    /// The display name is the first of nickname, username and name that is
    /// present, falling back to the email address.
    #[must_use]
    pub fn into_user(self) -> User {
        let display_name = self
            .nickname
            .or(self.username)
            .or(self.name)
            .unwrap_or_else(|| self.email.clone());

        User::new(UserId::new(self.id), display_name, self.email)
    }
}
