//! Authentication state types for the BraineX auth client.
//!
//! This module provides the types the client's session is made of and the
//! seams embedding code plugs into.
//!
//! # Overview
//!
//! - [`Session`]: the access/refresh token pair plus user profile, held as a unit
//! - [`User`] / [`Role`]: the authenticated identity and its closed role set
//! - [`SessionEvent`] / [`LogoutReason`]: lifecycle notifications for UI code
//! - [`SessionStore`] / [`MemorySessionStore`]: persistence across restarts
//!
//! # Session Lifecycle
//!
//! A session is created by `login`/`register` (all three fields set from the
//! server payload), mutated by the refresh protocol (access token only) and
//! profile operations (user only), and destroyed by `logout` or an
//! unrecoverable refresh failure (all three fields cleared atomically). The
//! session is owned exclusively by [`AuthClient`](crate::AuthClient);
//! embedding code reads it through accessor methods and never mutates it
//! directly.

mod events;
mod session;
mod store;
mod user;

pub use events::{LogoutReason, SessionEvent};
pub use session::Session;
pub use store::{MemorySessionStore, SessionStore};
pub use user::{ParseRoleError, Role, User};
