//! Authenticated API client with transparent token refresh.
//!
//! This module provides [`AuthClient`], the one type every other module uses
//! to reach the backend. It owns the session (access/refresh token pair plus
//! user profile), attaches bearer headers, recovers from expired access
//! tokens with a single-flight refresh, and broadcasts session lifecycle
//! events.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::auth::{LogoutReason, Role, Session, SessionEvent, SessionStore, User};
use crate::clients::errors::{
    ApiError, ApiFailure, FailureKind, SessionExpiredError, TokenRefreshError,
};
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{ApiEnvelope, ApiResponse, TokenPair};
use crate::config::AuthConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A session lifecycle observer.
type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Registration payload for [`AuthClient::register`].
///
/// Serializes to the camelCase body the backend expects. The server treats
/// any role other than `mentor` as `student`; admins are provisioned
/// server-side.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
    /// Field of study or mentorship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Requested role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"*****")
            .field("field", &self.field)
            .field("role", &self.role)
            .finish()
    }
}

/// `data` payload of a successful refresh response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedTokens {
    access_token: String,
}

/// Refresh coordinator state.
///
/// While a refresh is in flight the receiver half of a watch channel is
/// parked here; every caller that needs the outcome clones it and awaits the
/// single settled value.
enum RefreshState {
    Idle,
    Refreshing(watch::Receiver<Option<bool>>),
}

/// Whether this task drives the refresh call or waits on one in flight.
enum RefreshRole {
    Leader(watch::Sender<Option<bool>>),
    Waiter(watch::Receiver<Option<bool>>),
}

/// Authenticated client for the BraineX auth API.
///
/// The client owns the session triple (access token, refresh token, user)
/// and is the only code allowed to mutate it. Embedding applications
/// construct one instance at startup and share it (typically behind an
/// [`Arc`]); there is no ambient global.
///
/// # Token Refresh
///
/// [`request`](Self::request) recovers from a `401`/`TOKEN_EXPIRED` response
/// by refreshing the access token and retrying the original call exactly
/// once. Concurrent callers that need a refresh while one is outstanding do
/// not start a second network call; they wait on the in-flight one and
/// observe the same outcome. An unrecoverable refresh clears the session and
/// emits a [`SessionEvent::LoggedOut`] with reason
/// [`LogoutReason::SessionExpired`].
///
/// # Thread Safety
///
/// `AuthClient` is `Send + Sync`. Session reads are synchronous and always
/// observe the three session fields consistently with each other.
///
/// # Example
///
/// ```rust,ignore
/// use brainex_auth::{ApiRequest, AuthClient, AuthConfig, BaseUrl, HttpMethod};
///
/// let config = AuthConfig::builder()
///     .base_url(BaseUrl::new("https://portal.example.com/api/auth")?)
///     .build()?;
/// let client = AuthClient::new(config);
///
/// client.login("amina@example.com", "secret").await?;
///
/// let response = client
///     .request(ApiRequest::builder(HttpMethod::Get, "/me").build()?)
///     .await?;
/// ```
pub struct AuthClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: AuthConfig,
    /// Headers included in every request; `Authorization` is computed per call.
    default_headers: HashMap<String, String>,
    session: RwLock<Session>,
    refresh: Mutex<RefreshState>,
    listeners: Mutex<Vec<Listener>>,
    store: Option<Box<dyn SessionStore>>,
}

// Verify AuthClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthClient>();
};

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .field("session", &self.session())
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    /// Creates a new client with no persistence; the session starts empty.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self::build(config, None)
    }

    /// Creates a new client backed by a [`SessionStore`].
    ///
    /// The store is read once, here; a previously persisted session resumes
    /// without a fresh login. Every subsequent session mutation is written
    /// through to the store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_store(config: AuthConfig, store: Box<dyn SessionStore>) -> Self {
        Self::build(config, Some(store))
    }

    fn build(config: AuthConfig, store: Option<Box<dyn SessionStore>>) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}BraineX Auth Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        // Resume a persisted session, if the host provided a store
        let session = store
            .as_ref()
            .and_then(|store| store.load())
            .unwrap_or_else(Session::empty);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            default_headers,
            session: RwLock::new(session),
            refresh: Mutex::new(RefreshState::Idle),
            listeners: Mutex::new(Vec::new()),
            store,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the headers included in every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    // ==================== SESSION ACCESS ====================

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session_read().clone()
    }

    /// Returns `true` if both an access token and a user are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session_read().is_authenticated()
    }

    /// Returns `true` if the current user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.session_read()
            .user
            .as_ref()
            .is_some_and(|user| user.role == role)
    }

    /// Returns `true` if the current user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Returns a copy of the current user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session_read().user.clone()
    }

    /// Registers an observer for session lifecycle events.
    ///
    /// Listeners run synchronously on the task that caused the change, after
    /// the session mutation has committed, so a listener reading the session
    /// sees the post-event state.
    pub fn on_session_changed(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners_lock().push(Arc::new(listener));
    }

    // ==================== REQUEST PIPELINE ====================

    /// Sends a request, transparently recovering from an expired access token.
    ///
    /// A `Content-Type: application/json` header is attached to every call
    /// and, unless the request was built with `.auth(false)`, an
    /// `Authorization: Bearer <token>` header when a token is held. Extra
    /// headers on the request are merged over the computed ones.
    ///
    /// On a `401` whose envelope carries the `TOKEN_EXPIRED` code, the client
    /// runs the refresh protocol and retries the original call exactly once
    /// with the new token; the retry's outcome is returned as-is, so a call
    /// issues at most two HTTP requests. Any other non-2xx response is
    /// returned for the caller to inspect, not raised as an error.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] if the request fails validation.
    /// - [`ApiError::Network`] on transport failure; the session is untouched.
    /// - [`ApiError::SessionExpired`] if the token expired and no refresh
    ///   token is held, or the refresh failed. The session has been cleared
    ///   and a logout event emitted by the time this returns.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.verify()?;
        let url = self.config.base_url().join(&request.path);

        let response = self.send(&request, &url).await?;

        if response.code != 401 || !request.auth {
            return Ok(response);
        }

        // Only an expired access token is recoverable; other 401s are
        // terminal and surface unchanged.
        if !response.envelope().is_token_expired() {
            return Ok(response);
        }

        if self.refresh_token().is_none() {
            self.expire_session();
            return Err(SessionExpiredError.into());
        }

        if self.refresh_access_token().await {
            return self.send(&request, &url).await;
        }

        Err(SessionExpiredError.into())
    }

    /// Issues one HTTP call with the current headers. No refresh, no retry.
    async fn send(&self, request: &ApiRequest, url: &str) -> Result<ApiResponse, ApiError> {
        // Merge headers: defaults, then bearer, then request extras on top
        let mut headers = self.default_headers.clone();
        if request.auth {
            if let Some(token) = self.access_token() {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                // For 5xx errors, keep the raw body for diagnostics
                if code >= 500 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        Ok(ApiResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    // ==================== TOKEN REFRESH ====================

    /// Exchanges the refresh token for a new access token.
    ///
    /// Concurrent calls collapse into one network call: the first caller
    /// drives the exchange and every other caller waits on it, so all of them
    /// observe the same outcome. The underlying call is bounded by
    /// [`AuthConfig::refresh_timeout`], so a hung exchange settles as a
    /// failure instead of blocking waiters forever.
    ///
    /// Returns `true` if a new access token was installed. On failure the
    /// session is cleared and a [`SessionEvent::LoggedOut`] with reason
    /// [`LogoutReason::SessionExpired`] is emitted.
    pub async fn refresh_access_token(&self) -> bool {
        let role = {
            let mut state = self.refresh_lock();
            match &*state {
                // A live refresh is in flight; wait on its outcome.
                RefreshState::Refreshing(rx) if rx.has_changed().is_ok() => {
                    RefreshRole::Waiter(rx.clone())
                }
                // Idle, or a previous leader died without settling; take over.
                _ => {
                    let (tx, rx) = watch::channel(None);
                    *state = RefreshState::Refreshing(rx);
                    RefreshRole::Leader(tx)
                }
            }
        };

        match role {
            RefreshRole::Waiter(mut rx) => loop {
                if let Some(outcome) = *rx.borrow_and_update() {
                    return outcome;
                }
                if rx.changed().await.is_err() {
                    // The leader vanished without settling.
                    return false;
                }
            },
            RefreshRole::Leader(tx) => {
                let outcome = self.perform_refresh().await;
                let _ = tx.send(Some(outcome));
                *self.refresh_lock() = RefreshState::Idle;
                outcome
            }
        }
    }

    /// Drives one refresh exchange and applies its result to the session.
    async fn perform_refresh(&self) -> bool {
        let Some(refresh_token) = self.refresh_token() else {
            self.expire_session();
            return false;
        };

        let timeout = self.config.refresh_timeout();
        let outcome = match tokio::time::timeout(timeout, self.send_refresh(refresh_token)).await {
            Ok(Ok(access_token)) => {
                self.replace_access_token(access_token);
                true
            }
            Ok(Err(err)) => {
                tracing::warn!("Token refresh failed: {err}");
                false
            }
            Err(_) => {
                tracing::warn!("Token refresh timed out after {timeout:?}");
                false
            }
        };

        if !outcome {
            self.expire_session();
        }
        outcome
    }

    /// Calls the refresh endpoint and extracts the new access token.
    async fn send_refresh(&self, refresh_token: String) -> Result<String, TokenRefreshError> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        let request = ApiRequest::builder(HttpMethod::Post, "/refresh-token")
            .body(body)
            .auth(false)
            .build()
            .map_err(|e| TokenRefreshError {
                status: 0,
                message: e.to_string(),
            })?;
        let url = self.config.base_url().join(&request.path);

        let response = self
            .send(&request, &url)
            .await
            .map_err(|e| TokenRefreshError {
                status: 0,
                message: e.to_string(),
            })?;

        let envelope = response.envelope();
        if !response.is_ok() || !envelope.success {
            return Err(TokenRefreshError {
                status: response.code,
                message: envelope
                    .error_message()
                    .unwrap_or("Failed to refresh token")
                    .to_string(),
            });
        }

        let tokens: RefreshedTokens = envelope.decode_data().ok_or_else(|| TokenRefreshError {
            status: response.code,
            message: "Refresh response did not include an access token".to_string(),
        })?;

        Ok(tokens.access_token)
    }

    // ==================== AUTH OPERATIONS ====================

    /// Logs in with email and password.
    ///
    /// On success the access token, refresh token, and user are installed
    /// atomically, persisted, and a [`SessionEvent::LoggedIn`] is emitted.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure; a previously held
    /// session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiFailure> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.authenticate("/login", body, "Login failed. Please try again.")
            .await
    }

    /// Creates a new account.
    ///
    /// Behaves like [`login`](Self::login) on success: session installed,
    /// persisted, `LoggedIn` emitted.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure.
    pub async fn register(&self, user_data: &RegisterRequest) -> Result<User, ApiFailure> {
        let body = serde_json::to_value(user_data).map_err(|e| {
            ApiFailure::new(FailureKind::Validation, format!("Invalid registration data: {e}"))
        })?;
        self.authenticate("/register", body, "Registration failed. Please try again.")
            .await
    }

    /// Shared login/register flow: call, decode tokens + user, install, emit.
    async fn authenticate(
        &self,
        path: &str,
        body: serde_json::Value,
        fallback: &str,
    ) -> Result<User, ApiFailure> {
        let request = ApiRequest::builder(HttpMethod::Post, path)
            .body(body)
            .auth(false)
            .build()
            .map_err(ApiError::from)?;

        let response = self.request(request).await?;
        let envelope = response.envelope();

        if !envelope.success {
            return Err(Self::failure_from_envelope(&response, &envelope, fallback));
        }

        let tokens = envelope.tokens.clone().ok_or_else(|| {
            ApiFailure::new(
                FailureKind::Server,
                "Server response did not include tokens",
            )
        })?;
        let user: User = envelope.decode_data().ok_or_else(|| {
            ApiFailure::new(
                FailureKind::Server,
                "Server response did not include a user profile",
            )
        })?;

        self.install_session(&tokens, user.clone());
        self.emit(&SessionEvent::LoggedIn { user: user.clone() });

        Ok(user)
    }

    /// Logs out.
    ///
    /// The server is notified on a best-effort basis (one attempt, current
    /// token, no refresh); whether or not that call succeeds, the session is
    /// cleared, the clear is persisted, and a [`SessionEvent::LoggedOut`]
    /// with reason [`LogoutReason::UserInitiated`] is emitted.
    pub async fn logout(&self) {
        let body = serde_json::json!({ "refreshToken": self.refresh_token() });
        if let Ok(request) = ApiRequest::builder(HttpMethod::Post, "/logout")
            .body(body)
            .build()
        {
            let url = self.config.base_url().join(&request.path);
            if let Err(err) = self.send(&request, &url).await {
                tracing::debug!("Logout notification failed: {err}");
            }
        }

        self.clear_session();
        self.emit(&SessionEvent::LoggedOut {
            reason: LogoutReason::UserInitiated,
        });
    }

    /// Fetches the current user from the server and replaces the stored one.
    ///
    /// Tokens are untouched.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure; the session is
    /// unchanged.
    pub async fn get_current_user(&self) -> Result<User, ApiFailure> {
        let request = ApiRequest::builder(HttpMethod::Get, "/me")
            .build()
            .map_err(ApiError::from)?;

        let response = self.request(request).await?;
        let envelope = response.envelope();

        if !envelope.success {
            return Err(Self::failure_from_envelope(
                &response,
                &envelope,
                "Failed to get user data",
            ));
        }

        let user: User = envelope.decode_data().ok_or_else(|| {
            ApiFailure::new(
                FailureKind::Server,
                "Server response did not include a user profile",
            )
        })?;

        self.replace_user(user.clone());
        Ok(user)
    }

    /// Updates the user's profile and replaces the stored user with the
    /// server's updated copy.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure; no partial
    /// mutation occurs.
    pub async fn update_profile(&self, profile_data: serde_json::Value) -> Result<User, ApiFailure> {
        let request = ApiRequest::builder(HttpMethod::Put, "/profile")
            .body(profile_data)
            .build()
            .map_err(ApiError::from)?;

        let response = self.request(request).await?;
        let envelope = response.envelope();

        if !envelope.success {
            return Err(Self::failure_from_envelope(
                &response,
                &envelope,
                "Failed to update profile",
            ));
        }

        let user: User = envelope.decode_data().ok_or_else(|| {
            ApiFailure::new(
                FailureKind::Server,
                "Server response did not include a user profile",
            )
        })?;

        self.replace_user(user.clone());
        Ok(user)
    }

    /// Changes the password. If the server issues new tokens, both are
    /// rotated; the stored user is untouched.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure; no partial
    /// mutation occurs.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiFailure> {
        let body = serde_json::json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        });
        let request = ApiRequest::builder(HttpMethod::Put, "/change-password")
            .body(body)
            .build()
            .map_err(ApiError::from)?;

        let response = self.request(request).await?;
        let envelope = response.envelope();

        if !envelope.success {
            return Err(Self::failure_from_envelope(
                &response,
                &envelope,
                "Failed to change password",
            ));
        }

        if let Some(tokens) = &envelope.tokens {
            self.rotate_tokens(tokens);
        }

        Ok(())
    }

    /// Requests a password-reset email. Public endpoint; no session involved.
    ///
    /// Returns the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ApiFailure`] on any failure.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiFailure> {
        let body = serde_json::json!({ "email": email });
        let request = ApiRequest::builder(HttpMethod::Post, "/forgot-password")
            .body(body)
            .auth(false)
            .build()
            .map_err(ApiError::from)?;

        let response = self.request(request).await?;
        let envelope = response.envelope();

        if !envelope.success {
            return Err(Self::failure_from_envelope(
                &response,
                &envelope,
                "Failed to process request",
            ));
        }

        Ok(envelope
            .message
            .unwrap_or_else(|| "Reset link sent".to_string()))
    }

    /// Maps a non-success envelope to a structured failure.
    fn failure_from_envelope(
        response: &ApiResponse,
        envelope: &ApiEnvelope,
        fallback: &str,
    ) -> ApiFailure {
        ApiFailure::new(
            ApiFailure::classify(response.code),
            envelope.error_message().unwrap_or(fallback),
        )
    }

    // ==================== SESSION MUTATION ====================
    //
    // The four explicit mutations below are the only writers of the session.
    // Each takes the write lock once, applies the whole change, and writes
    // the new snapshot through to the store before releasing, so readers and
    // the store never observe a torn session.

    /// Installs a full session after login/register.
    fn install_session(&self, tokens: &TokenPair, user: User) {
        let mut session = self.session_write();
        session.access_token = Some(tokens.access_token.clone());
        session.refresh_token = tokens.refresh_token.clone();
        session.user = Some(user);
        self.persist(&session);
    }

    /// Replaces only the access token after a successful refresh.
    fn replace_access_token(&self, access_token: String) {
        let mut session = self.session_write();
        session.access_token = Some(access_token);
        self.persist(&session);
    }

    /// Rotates the token pair after a password change; the refresh token is
    /// kept when the server did not issue a new one.
    fn rotate_tokens(&self, tokens: &TokenPair) {
        let mut session = self.session_write();
        session.access_token = Some(tokens.access_token.clone());
        if let Some(refresh_token) = &tokens.refresh_token {
            session.refresh_token = Some(refresh_token.clone());
        }
        self.persist(&session);
    }

    /// Replaces only the stored user.
    fn replace_user(&self, user: User) {
        let mut session = self.session_write();
        session.user = Some(user);
        self.persist(&session);
    }

    /// Clears the session; returns whether anything was actually held.
    fn clear_session(&self) -> bool {
        let mut session = self.session_write();
        let had_data = session.has_data();
        *session = Session::empty();
        if let Some(store) = &self.store {
            store.clear();
        }
        had_data
    }

    /// Clears the session because it could not be recovered, emitting the
    /// logout event only when this call did the clearing, so concurrent
    /// failures produce a single event.
    fn expire_session(&self) {
        if self.clear_session() {
            self.emit(&SessionEvent::LoggedOut {
                reason: LogoutReason::SessionExpired,
            });
        }
    }

    fn persist(&self, session: &Session) {
        if let Some(store) = &self.store {
            store.save(session);
        }
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = self.listeners_lock().clone();
        for listener in listeners {
            listener(event);
        }
    }

    // ==================== LOCK HELPERS ====================
    //
    // A poisoned lock means a listener or store panicked mid-call; the
    // session data itself is still a coherent snapshot, so recover it.

    fn session_read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn session_write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_lock(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners_lock(&self) -> std::sync::MutexGuard<'_, Vec<Listener>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn access_token(&self) -> Option<String> {
        self.session_read().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.session_read().refresh_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::config::BaseUrl;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_config() -> AuthConfig {
        AuthConfig::builder()
            .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
            .build()
            .unwrap()
    }

    fn sample_user(role: Role) -> User {
        User {
            id: "1".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            name: "Amina Diallo".to_string(),
            email: "amina@example.com".to_string(),
            role,
            field: None,
            is_email_verified: true,
        }
    }

    fn seeded_store(role: Role) -> Box<MemorySessionStore> {
        Box::new(MemorySessionStore::with_session(Session {
            access_token: Some("stored-access".to_string()),
            refresh_token: Some("stored-refresh".to_string()),
            user: Some(sample_user(role)),
        }))
    }

    #[test]
    fn test_fresh_client_is_unauthenticated() {
        let client = AuthClient::new(test_config());
        assert!(!client.is_authenticated());
        assert!(client.current_user().is_none());
        assert!(!client.is_admin());
    }

    #[test]
    fn test_client_resumes_persisted_session() {
        let client = AuthClient::with_store(test_config(), seeded_store(Role::Student));
        assert!(client.is_authenticated());
        assert_eq!(client.current_user().unwrap().email, "amina@example.com");
    }

    #[test]
    fn test_role_predicates() {
        let client = AuthClient::with_store(test_config(), seeded_store(Role::Admin));
        assert!(client.has_role(Role::Admin));
        assert!(client.is_admin());
        assert!(!client.has_role(Role::Mentor));

        let client = AuthClient::with_store(test_config(), seeded_store(Role::Mentor));
        assert!(client.has_role(Role::Mentor));
        assert!(!client.is_admin());
    }

    #[test]
    fn test_default_headers() {
        let client = AuthClient::new(test_config());
        let headers = client.default_headers();

        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));

        let user_agent = headers.get("User-Agent").unwrap();
        assert!(user_agent.contains("BraineX Auth Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = AuthConfig::builder()
            .base_url(BaseUrl::new("https://portal.example.com/api/auth").unwrap())
            .user_agent_prefix("BraineXWeb/2.1")
            .build()
            .unwrap();
        let client = AuthClient::new(config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("BraineXWeb/2.1 | "));
        assert!(user_agent.contains("BraineX Auth Client"));
    }

    #[test]
    fn test_clear_session_reports_whether_data_was_held() {
        let client = AuthClient::with_store(test_config(), seeded_store(Role::Student));
        assert!(client.clear_session());
        assert!(!client.clear_session());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_expire_session_emits_once() {
        let client = AuthClient::with_store(test_config(), seeded_store(Role::Student));
        let expirations = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&expirations);
        client.on_session_changed(move |event| {
            if matches!(
                event,
                SessionEvent::LoggedOut {
                    reason: LogoutReason::SessionExpired
                }
            ) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        client.expire_session();
        client.expire_session();

        assert_eq!(expirations.load(Ordering::SeqCst), 1);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_session_mutations_write_through_to_store() {
        let store = seeded_store(Role::Student);
        let client = AuthClient::with_store(test_config(), store);

        client.replace_access_token("rotated".to_string());
        let persisted = client.store.as_ref().unwrap().load().unwrap();
        assert_eq!(persisted.access_token.as_deref(), Some("rotated"));
        assert_eq!(persisted.refresh_token.as_deref(), Some("stored-refresh"));

        client.clear_session();
        assert!(client.store.as_ref().unwrap().load().is_none());
    }

    #[test]
    fn test_install_session_sets_all_fields_atomically() {
        let client = AuthClient::new(test_config());
        let tokens = TokenPair {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
        };

        client.install_session(&tokens, sample_user(Role::Student));

        let session = client.session();
        assert_eq!(session.access_token.as_deref(), Some("a"));
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert!(session.user.is_some());
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_rotate_tokens_keeps_refresh_token_when_absent() {
        let client = AuthClient::with_store(test_config(), seeded_store(Role::Student));

        client.rotate_tokens(&TokenPair {
            access_token: "new-access".to_string(),
            refresh_token: None,
        });

        let session = client.session();
        assert_eq!(session.access_token.as_deref(), Some("new-access"));
        assert_eq!(session.refresh_token.as_deref(), Some("stored-refresh"));
    }

    #[test]
    fn test_register_request_debug_masks_password() {
        let request = RegisterRequest {
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            email: "amina@example.com".to_string(),
            password: "hunter2".to_string(),
            field: None,
            role: None,
        };

        let debug = format!("{request:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("*****"));
    }

    #[test]
    fn test_register_request_serializes_camel_case() {
        let request = RegisterRequest {
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            email: "amina@example.com".to_string(),
            password: "pw".to_string(),
            field: Some("engineering".to_string()),
            role: Some(Role::Mentor),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Amina");
        assert_eq!(json["role"], "mentor");
        assert_eq!(json["field"], "engineering");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthClient>();
    }
}
