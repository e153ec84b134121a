//! Session persistence.
//!
//! The original web client keeps the access token, the refresh token, and the
//! serialized user profile across page reloads; this module provides the
//! equivalent seam for Rust hosts. A [`SessionStore`] is written as a unit on
//! login, refresh, and logout, and read exactly once when the client is
//! constructed.
//!
//! The crate ships [`MemorySessionStore`] for tests and single-process hosts.
//! Applications that need durable storage (a keychain, a file, a browser's
//! storage API) implement the trait themselves.

use crate::auth::Session;
use std::sync::Mutex;

/// Storage for the persisted session triple.
///
/// Implementations must treat the session as a single value: `save` replaces
/// all three fields together and `clear` removes them together, preserving
/// the token-and-user-live-together invariant across restarts.
///
/// # Example
///
/// ```rust
/// use brainex_auth::{MemorySessionStore, Session, SessionStore};
///
/// let store = MemorySessionStore::new();
/// assert!(store.load().is_none());
///
/// store.save(&Session::empty());
/// assert!(store.load().is_some());
///
/// store.clear();
/// assert!(store.load().is_none());
/// ```
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session, if any.
    ///
    /// A store that cannot decode its contents should return `None` rather
    /// than a partially populated session.
    fn load(&self) -> Option<Session>;

    /// Persists the session, replacing any previous value.
    fn save(&self, session: &Session);

    /// Removes the persisted session.
    fn clear(&self);
}

/// An in-process [`SessionStore`] backed by a mutex-guarded slot.
///
/// Useful in tests and in hosts that only need the session to survive for
/// the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a session, as if a previous run
    /// had saved it.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, session: &Session) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

// Verify MemorySessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemorySessionStore>();
};
