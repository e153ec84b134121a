//! Configuration types for the BraineX auth client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with the authentication service.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AuthConfig`]: The main configuration struct holding all client settings
//! - [`AuthConfigBuilder`]: A builder for constructing [`AuthConfig`] instances
//! - [`BaseUrl`]: A validated base URL newtype
//!
//! # Example
//!
//! ```rust
//! use brainex_auth::{AuthConfig, BaseUrl};
//!
//! let config = AuthConfig::builder()
//!     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use crate::error::ConfigError;
use std::time::Duration;

/// Default bound on how long a token refresh call (and therefore any caller
/// waiting on it) may be outstanding before it is treated as failed.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the BraineX auth client.
///
/// This struct holds all configuration needed for client operations: the
/// auth-service base URL, an optional User-Agent prefix, and the bound on
/// token-refresh wait time.
///
/// # Thread Safety
///
/// `AuthConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use brainex_auth::{AuthConfig, BaseUrl};
/// use std::time::Duration;
///
/// let config = AuthConfig::builder()
///     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
///     .user_agent_prefix("BraineXWeb/2.1")
///     .refresh_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.refresh_timeout(), Duration::from_secs(5));
/// ```
#[derive(Clone, Debug)]
pub struct AuthConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    refresh_timeout: Duration,
}

impl AuthConfig {
    /// Creates a new builder for constructing an `AuthConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brainex_auth::{AuthConfig, BaseUrl};
    ///
    /// let config = AuthConfig::builder()
    ///     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::new()
    }

    /// Returns the auth-service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the bound on token-refresh wait time.
    #[must_use]
    pub const fn refresh_timeout(&self) -> Duration {
        self.refresh_timeout
    }
}

// Verify AuthConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthConfig>();
};

/// Builder for constructing [`AuthConfig`] instances.
///
/// This builder provides a fluent API for configuring the client. The only
/// required field is `base_url`; all other fields have sensible defaults.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `refresh_timeout`: [`DEFAULT_REFRESH_TIMEOUT`] (10 seconds)
///
/// # Example
///
/// ```rust
/// use brainex_auth::{AuthConfig, BaseUrl};
///
/// let config = AuthConfig::builder()
///     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
///     .user_agent_prefix("BraineXWeb/2.1")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    refresh_timeout: Option<Duration>,
}

impl AuthConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the auth-service base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the bound on how long a token refresh may be outstanding.
    ///
    /// Callers queued behind an in-flight refresh wait at most this long
    /// before observing a failed outcome; the session is cleared when the
    /// bound is exceeded.
    #[must_use]
    pub const fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = Some(timeout);
        self
    }

    /// Builds the [`AuthConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<AuthConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(AuthConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            refresh_timeout: self.refresh_timeout.unwrap_or(DEFAULT_REFRESH_TIMEOUT),
        })
    }
}
