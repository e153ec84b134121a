//! Session state for the BraineX auth client.
//!
//! This module provides the [`Session`] type: the access/refresh token pair
//! plus the last known user profile, held as a unit.

use crate::auth::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authentication state owned by the client.
///
/// A session holds the short-lived access token, the longer-lived refresh
/// token, and the last known user profile. The client maintains one invariant
/// over this triple: the access token and the user are always set and cleared
/// together, so [`Session::is_authenticated`] never observes a token without
/// an identity or vice versa.
///
/// Sessions are plain snapshots; all mutation happens inside
/// [`AuthClient`](crate::AuthClient) under a single write lock.
///
/// # Security
///
/// The `Debug` implementation masks both token values, so sessions can be
/// logged without leaking credentials.
///
/// # Example
///
/// ```rust
/// use brainex_auth::Session;
///
/// let session = Session::empty();
/// assert!(!session.is_authenticated());
/// assert!(session.refresh_token.is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Short-lived bearer credential attached to authenticated requests.
    pub access_token: Option<String>,
    /// Longer-lived credential exchanged for new access tokens.
    pub refresh_token: Option<String>,
    /// Last known authenticated identity.
    pub user: Option<User>,
}

impl Session {
    /// Creates an empty, unauthenticated session.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            user: None,
        }
    }

    /// Returns `true` if both the access token and the user are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// Returns `true` if any of the three fields is populated.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.access_token.is_some() || self.refresh_token.is_some() || self.user.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "*****"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "*****"),
            )
            .field("user", &self.user)
            .finish()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn sample_user() -> User {
        User {
            id: "1".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            name: "Amina Diallo".to_string(),
            email: "amina@example.com".to_string(),
            role: Role::Student,
            field: None,
            is_email_verified: true,
        }
    }

    #[test]
    fn test_empty_session_is_unauthenticated() {
        let session = Session::empty();
        assert!(!session.is_authenticated());
        assert!(!session.has_data());
    }

    #[test]
    fn test_is_authenticated_requires_token_and_user() {
        // Token without user
        let token_only = Session {
            access_token: Some("token".to_string()),
            refresh_token: None,
            user: None,
        };
        assert!(!token_only.is_authenticated());

        // User without token
        let user_only = Session {
            access_token: None,
            refresh_token: None,
            user: Some(sample_user()),
        };
        assert!(!user_only.is_authenticated());

        // Both present
        let full = Session {
            access_token: Some("token".to_string()),
            refresh_token: Some("refresh".to_string()),
            user: Some(sample_user()),
        };
        assert!(full.is_authenticated());
    }

    #[test]
    fn test_has_data_detects_any_field() {
        let refresh_only = Session {
            access_token: None,
            refresh_token: Some("refresh".to_string()),
            user: None,
        };
        assert!(refresh_only.has_data());
        assert!(!refresh_only.is_authenticated());
    }

    #[test]
    fn test_debug_masks_tokens() {
        let session = Session {
            access_token: Some("super-secret-access".to_string()),
            refresh_token: Some("super-secret-refresh".to_string()),
            user: None,
        };

        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret-access"));
        assert!(!debug.contains("super-secret-refresh"));
        assert!(debug.contains("*****"));
    }

    #[test]
    fn test_serde_round_trip() {
        let session = Session {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            user: Some(sample_user()),
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("accessToken"));
        assert!(json.contains("refreshToken"));

        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
