//! Session lifecycle events.
//!
//! The client broadcasts a [`SessionEvent`] whenever a login completes or the
//! session ends, so independent screens can react uniformly (e.g. redirect to
//! a login page) without re-implementing the check. Subscribe with
//! [`AuthClient::on_session_changed`](crate::AuthClient::on_session_changed).

use crate::auth::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    /// The refresh protocol failed or no refresh token was available.
    SessionExpired,
    /// The user asked to log out.
    UserInitiated,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionExpired => write!(f, "session_expired"),
            Self::UserInitiated => write!(f, "user_initiated"),
        }
    }
}

/// A change in the authentication state observable by embedding code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login or registration completed and the session is populated.
    LoggedIn {
        /// The newly authenticated user.
        user: User,
    },
    /// The session was cleared.
    LoggedOut {
        /// Why the session ended.
        reason: LogoutReason,
    },
}

// Verify event types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionEvent>();
    assert_send_sync::<LogoutReason>();
};
