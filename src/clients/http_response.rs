//! API response types for the BraineX auth client.
//!
//! This module provides the [`ApiResponse`] type and the [`ApiEnvelope`]
//! decode of the backend's JSON envelope. The envelope is decoded once at the
//! HTTP boundary so downstream code matches on typed fields instead of
//! probing JSON defensively.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope `code` value signalling that the access token has expired.
///
/// A `401` response carrying this code is the specific trigger for the token
/// refresh protocol; any other `401` is a terminal auth failure.
pub const TOKEN_EXPIRED_CODE: &str = "TOKEN_EXPIRED";

/// An access/refresh token pair issued by the authentication service.
///
/// The refresh endpoint rotates only the access token, so `refresh_token`
/// is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Longer-lived credential used only to mint new access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// The JSON envelope wrapping every auth-service response.
///
/// ```json
/// { "success": true, "data": { ... }, "tokens": { ... }, "message": "...", "code": "..." }
/// ```
///
/// Fields absent from the body decode to their defaults, so a malformed or
/// empty body reads as an unsuccessful envelope rather than a decode error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the operation succeeded.
    #[serde(default)]
    pub success: bool,
    /// Operation payload (user objects, token maps, ...).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Freshly issued tokens, on login/register/change-password.
    #[serde(default)]
    pub tokens: Option<TokenPair>,
    /// Informational message.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable failure code (e.g. `TOKEN_EXPIRED`).
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable failure description.
    #[serde(default)]
    pub error: Option<String>,
    /// Per-field validation failures.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ApiEnvelope {
    /// Returns `true` if this envelope signals an expired access token.
    #[must_use]
    pub fn is_token_expired(&self) -> bool {
        !self.success && self.code.as_deref() == Some(TOKEN_EXPIRED_CODE)
    }

    /// Decodes the `data` payload into a typed value.
    ///
    /// Returns `None` if `data` is absent or does not match `T`.
    #[must_use]
    pub fn decode_data<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }

    /// Returns the best available failure description.
    ///
    /// Prefers `error`, then `message`; validation detail in `errors` is left
    /// for callers that want to render per-field problems.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// An HTTP response from the authentication service.
///
/// Contains the response status code, headers, and the parsed JSON body.
/// Non-2xx responses are ordinary values at this layer; use [`is_ok`](Self::is_ok)
/// and [`envelope`](Self::envelope) to interpret them.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Decodes the response body as an [`ApiEnvelope`].
    ///
    /// Bodies that are not envelope-shaped decode to the default
    /// (unsuccessful) envelope.
    #[must_use]
    pub fn envelope(&self) -> ApiEnvelope {
        serde_json::from_value(self.body.clone()).unwrap_or_default()
    }
}
