//! API request types for the BraineX auth client.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! describing calls made through [`AuthClient::request`](crate::AuthClient::request).

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidApiRequestError;

/// HTTP methods supported by the auth API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A request to be sent through the authenticated client.
///
/// Use [`ApiRequest::builder`] to construct requests with the builder
/// pattern. Request bodies are always JSON; the client sets
/// `Content-Type: application/json` on every call.
///
/// # Example
///
/// ```rust
/// use brainex_auth::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// // Authenticated GET (the default)
/// let get = ApiRequest::builder(HttpMethod::Get, "/me").build().unwrap();
/// assert!(get.auth);
///
/// // Public POST
/// let post = ApiRequest::builder(HttpMethod::Post, "/forgot-password")
///     .body(json!({"email": "amina@example.com"}))
///     .auth(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The endpoint path (relative to the configured base URL, or an
    /// absolute `http`/`https` URL passed through unchanged).
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers, merged over the computed defaults.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Whether to attach the bearer token (default: `true`). Set to `false`
    /// for public endpoints.
    pub auth: bool,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brainex_auth::{ApiRequest, HttpMethod};
    ///
    /// let request = ApiRequest::builder(HttpMethod::Get, "/me")
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidApiRequestError::MissingBody`] if `method` is `Post`
    /// or `Put` but `body` is `None`.
    pub fn verify(&self) -> Result<(), InvalidApiRequestError> {
        if matches!(self.method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidApiRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`ApiRequest`] instances.
///
/// Provides a fluent API for building requests with optional parameters.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
    auth: bool,
}

impl ApiRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
            auth: true,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets whether to attach the bearer token.
    ///
    /// Default is `true`. Pass `false` for public endpoints; the client then
    /// never attaches an `Authorization` header, even when a token is held.
    #[must_use]
    pub const fn auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidApiRequestError`] if the request fails validation.
    pub fn build(self) -> Result<ApiRequest, InvalidApiRequestError> {
        let request = ApiRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            auth: self.auth,
        };
        request.verify()?;
        Ok(request)
    }
}
