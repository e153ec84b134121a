//! # BraineX Auth Client
//!
//! A Rust client SDK for the BraineX portal's authentication API, providing
//! session management and an async HTTP client with transparent access-token
//! refresh.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`AuthConfig`] and [`AuthConfigBuilder`]
//! - A validated [`BaseUrl`] newtype for the auth-service address
//! - An authenticated [`AuthClient`] whose [`request`](AuthClient::request)
//!   recovers from expired access tokens with a single retry
//! - Single-flight coordination of concurrent token refreshes
//! - Session predicates ([`is_authenticated`](AuthClient::is_authenticated),
//!   [`has_role`](AuthClient::has_role), [`is_admin`](AuthClient::is_admin))
//! - Session lifecycle events via [`AuthClient::on_session_changed`]
//! - Pluggable session persistence via [`SessionStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use brainex_auth::{AuthClient, AuthConfig, BaseUrl};
//!
//! // Create configuration using the builder pattern
//! let config = AuthConfig::builder()
//!     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // One client instance for the whole application
//! let client = AuthClient::new(config);
//! assert!(!client.is_authenticated());
//! ```
//!
//! ## Logging In and Making Requests
//!
//! ```rust,ignore
//! use brainex_auth::{ApiRequest, HttpMethod};
//!
//! // Structured failures: branch on the kind, no catch-all needed
//! match client.login("amina@example.com", "secret").await {
//!     Ok(user) => println!("Welcome, {}", user.name),
//!     Err(failure) => eprintln!("{:?}: {}", failure.kind, failure.message),
//! }
//!
//! // Authenticated call; expired tokens are refreshed and retried once
//! let response = client
//!     .request(ApiRequest::builder(HttpMethod::Get, "/me").build()?)
//!     .await?;
//!
//! // Public call; no Authorization header is attached
//! let response = client
//!     .request(
//!         ApiRequest::builder(HttpMethod::Post, "/forgot-password")
//!             .body(serde_json::json!({"email": "amina@example.com"}))
//!             .auth(false)
//!             .build()?,
//!     )
//!     .await?;
//! ```
//!
//! ## Reacting to Session Changes
//!
//! Screens that need to respond to logins and logouts (e.g. redirect to a
//! login page when the session expires) subscribe once instead of checking
//! before every call:
//!
//! ```rust
//! use brainex_auth::{AuthClient, AuthConfig, BaseUrl, SessionEvent};
//!
//! # let config = AuthConfig::builder()
//! #     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
//! #     .build()
//! #     .unwrap();
//! let client = AuthClient::new(config);
//!
//! client.on_session_changed(|event| match event {
//!     SessionEvent::LoggedIn { user } => println!("hello {}", user.name),
//!     SessionEvent::LoggedOut { reason } => println!("logged out: {reason}"),
//! });
//! ```
//!
//! ## Persisting Sessions
//!
//! ```rust
//! use brainex_auth::{AuthClient, AuthConfig, BaseUrl, MemorySessionStore};
//!
//! # let config = AuthConfig::builder()
//! #     .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
//! #     .build()
//! #     .unwrap();
//! // The store is read once at construction; every session change is
//! // written through. Implement `SessionStore` for durable backends.
//! let client = AuthClient::with_store(config, Box::new(MemorySessionStore::new()));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the client is instance-based and passed explicitly
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime
//! - **Single writer**: the session is mutated only by the client itself

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{
    LogoutReason, MemorySessionStore, ParseRoleError, Role, Session, SessionEvent, SessionStore,
    User,
};
pub use config::{AuthConfig, AuthConfigBuilder, BaseUrl, DEFAULT_REFRESH_TIMEOUT};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ApiEnvelope, ApiError, ApiFailure, ApiRequest, ApiRequestBuilder, ApiResponse, AuthClient,
    FailureKind, HttpMethod, InvalidApiRequestError, RegisterRequest, SessionExpiredError,
    TokenPair, TokenRefreshError, TOKEN_EXPIRED_CODE,
};
