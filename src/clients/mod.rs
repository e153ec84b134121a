//! HTTP client types for the BraineX auth API.
//!
//! This module provides the authenticated client layer: the request/response
//! types, the error taxonomy, and [`AuthClient`] itself.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AuthClient`]: the authenticated client with transparent token refresh
//! - [`ApiRequest`] / [`ApiRequestBuilder`]: a request to be sent
//! - [`ApiResponse`]: a parsed response, with [`ApiEnvelope`] decoding
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiError`]: errors rejected by [`AuthClient::request`]
//! - [`ApiFailure`] / [`FailureKind`]: structured failures returned by the
//!   high-level operations
//!
//! # Example
//!
//! ```rust,ignore
//! use brainex_auth::{ApiRequest, AuthClient, AuthConfig, BaseUrl, HttpMethod};
//!
//! let config = AuthConfig::builder()
//!     .base_url(BaseUrl::new("https://portal.example.com/api/auth")?)
//!     .build()?;
//! let client = AuthClient::new(config);
//!
//! let response = client
//!     .request(ApiRequest::builder(HttpMethod::Get, "/me").build()?)
//!     .await?;
//! ```
//!
//! # Refresh Behavior
//!
//! [`AuthClient::request`] recovers from an expired access token exactly once
//! per call: on a `401` carrying the `TOKEN_EXPIRED` envelope code it runs
//! the refresh protocol and re-issues the original request with the new
//! token. Concurrent callers share one in-flight refresh. See
//! [`AuthClient::refresh_access_token`] for the protocol details.

mod auth_client;
mod errors;
mod http_request;
mod http_response;

pub use auth_client::{AuthClient, RegisterRequest, SDK_VERSION};
pub use errors::{
    ApiError, ApiFailure, FailureKind, InvalidApiRequestError, SessionExpiredError,
    TokenRefreshError,
};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::{ApiEnvelope, ApiResponse, TokenPair, TOKEN_EXPIRED_CODE};
