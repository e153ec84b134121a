//! Error types for API communication.
//!
//! This module contains the two error surfaces of the client:
//!
//! - [`ApiError`]: the error type rejected by [`AuthClient::request`]
//!   (network failures, pre-send validation failures, and unrecoverable
//!   session expiry). Callers of `request()` already operate in an
//!   async-error-handling context, so these propagate as `Err`.
//! - [`ApiFailure`]: the structured, non-throwing failure returned by the
//!   high-level operations (`login`, `register`, `get_current_user`, ...), so
//!   UI code can branch on [`FailureKind`] without catching anything.
//!
//! [`AuthClient::request`]: crate::AuthClient::request
//!
//! # Example
//!
//! ```rust,ignore
//! use brainex_auth::{ApiError, ApiRequest, HttpMethod};
//!
//! match client.request(ApiRequest::builder(HttpMethod::Get, "/me").build()?).await {
//!     Ok(response) => println!("Status: {}", response.code),
//!     Err(ApiError::SessionExpired(e)) => {
//!         // The session was cleared and a logout event was emitted.
//!         println!("{e}");
//!     }
//!     Err(ApiError::Network(e)) => println!("Network error: {e}"),
//!     Err(ApiError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request's session could not be recovered.
///
/// Raised when a request hits an expired access token and either no refresh
/// token is available or the refresh protocol failed. By the time this error
/// reaches the caller the session has already been cleared and a
/// [`LoggedOut`](crate::SessionEvent::LoggedOut) event with reason
/// [`SessionExpired`](crate::LogoutReason::SessionExpired) has been emitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Session expired. Please login again.")]
pub struct SessionExpiredError;

/// Error returned when a token refresh call fails.
///
/// Network-level failures carry status `0`; HTTP-level failures carry the
/// response status. This error never reaches `request()` callers directly
/// (they observe [`SessionExpiredError`]); it exists for logging and for
/// hosts that drive [`AuthClient::refresh_access_token`] themselves.
///
/// [`AuthClient::refresh_access_token`]: crate::AuthClient::refresh_access_token
#[derive(Debug, Error)]
#[error("Token refresh failed (status {status}): {message}")]
pub struct TokenRefreshError {
    /// HTTP status of the refresh response, or `0` for network errors.
    pub status: u16,
    /// Description of the failure.
    pub message: String,
}

/// Error returned when an API request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidApiRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for [`AuthClient::request`](crate::AuthClient::request).
///
/// Use pattern matching to handle specific failure modes. Note the
/// boundaries: a completed HTTP exchange with a non-2xx status is NOT an
/// error at this layer; the response is returned for the caller to inspect.
/// Only transport failures, validation failures, and unrecoverable session
/// expiry reject.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request validation failed before anything was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidApiRequestError),

    /// Network or connection error; the session is untouched.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The session expired and could not be recovered; the session has been
    /// cleared and a logout event emitted.
    #[error(transparent)]
    SessionExpired(#[from] SessionExpiredError),
}

/// Classification of a structured failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure; retry or surface to the user.
    Network,
    /// The session expired or the server rejected the credentials.
    AuthExpired,
    /// The server rejected the payload (4xx other than auth).
    Validation,
    /// The server failed (5xx) or answered with an unrecognized shape.
    Server,
}

/// A structured failure returned by the high-level auth operations.
///
/// These are ordinary values rather than propagated errors so that calling
/// code can branch on [`kind`](Self::kind) and show
/// [`message`](Self::message) without a catch-all error handler.
///
/// # Example
///
/// ```rust
/// use brainex_auth::{ApiFailure, FailureKind};
///
/// let failure = ApiFailure::new(FailureKind::Validation, "Please provide email and password");
/// assert_eq!(failure.kind, FailureKind::Validation);
/// assert_eq!(failure.to_string(), "Please provide email and password");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiFailure {
    /// What went wrong, coarsely.
    pub kind: FailureKind,
    /// Human-readable description, preferring the server's own message.
    pub message: String,
}

impl ApiFailure {
    /// Creates a failure from a kind and message.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classifies a non-success response by status code.
    pub(crate) fn classify(status: u16) -> FailureKind {
        match status {
            401 | 403 => FailureKind::AuthExpired,
            400..=499 => FailureKind::Validation,
            _ => FailureKind::Server,
        }
    }
}

impl From<ApiError> for ApiFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(e) => Self::new(FailureKind::Network, format!("Network error: {e}")),
            ApiError::SessionExpired(e) => Self::new(FailureKind::AuthExpired, e.to_string()),
            ApiError::InvalidRequest(e) => Self::new(FailureKind::Validation, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_error_message() {
        let error = SessionExpiredError;
        assert_eq!(error.to_string(), "Session expired. Please login again.");
    }

    #[test]
    fn test_token_refresh_error_includes_status() {
        let error = TokenRefreshError {
            status: 401,
            message: "Invalid or expired refresh token".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Invalid or expired refresh token"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidApiRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(ApiFailure::classify(401), FailureKind::AuthExpired);
        assert_eq!(ApiFailure::classify(403), FailureKind::AuthExpired);
        assert_eq!(ApiFailure::classify(400), FailureKind::Validation);
        assert_eq!(ApiFailure::classify(409), FailureKind::Validation);
        assert_eq!(ApiFailure::classify(422), FailureKind::Validation);
        assert_eq!(ApiFailure::classify(500), FailureKind::Server);
        assert_eq!(ApiFailure::classify(503), FailureKind::Server);
        assert_eq!(ApiFailure::classify(200), FailureKind::Server);
    }

    #[test]
    fn test_api_failure_from_session_expired() {
        let failure = ApiFailure::from(ApiError::SessionExpired(SessionExpiredError));
        assert_eq!(failure.kind, FailureKind::AuthExpired);
        assert_eq!(failure.message, "Session expired. Please login again.");
    }

    #[test]
    fn test_api_failure_from_invalid_request() {
        let failure = ApiFailure::from(ApiError::InvalidRequest(
            InvalidApiRequestError::MissingBody {
                method: "put".to_string(),
            },
        ));
        assert_eq!(failure.kind, FailureKind::Validation);
        assert!(failure.message.contains("put"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &SessionExpiredError;
        let _: &dyn std::error::Error = &TokenRefreshError {
            status: 0,
            message: "test".to_string(),
        };
        let _: &dyn std::error::Error = &InvalidApiRequestError::MissingBody {
            method: "post".to_string(),
        };
        let _: &dyn std::error::Error = &ApiFailure::new(FailureKind::Server, "test");
    }
}
