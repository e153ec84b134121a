//! User identity types for the BraineX auth client.
//!
//! This module provides the [`User`] profile type returned by the
//! authentication service and the closed [`Role`] set used for access checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a user holds on the portal.
///
/// Roles form a closed set; access predicates like
/// [`AuthClient::is_admin`](crate::AuthClient::is_admin) compare against
/// these variants rather than raw strings.
///
/// # Example
///
/// ```rust
/// use brainex_auth::Role;
///
/// let role: Role = "mentor".parse().unwrap();
/// assert_eq!(role, Role::Mentor);
/// assert_eq!(role.to_string(), "mentor");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An ordinary member working toward scholarships and programs.
    Student,
    /// A member offering mentorship sessions.
    Mentor,
    /// A portal administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Mentor => write!(f, "mentor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{role}'. Expected one of: student, mentor, admin.")]
pub struct ParseRoleError {
    /// The unrecognized role string.
    pub role: String,
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "mentor" => Ok(Self::Mentor),
            "admin" => Ok(Self::Admin),
            other => Err(ParseRoleError {
                role: other.to_string(),
            }),
        }
    }
}

/// An authenticated user profile as returned by the authentication service.
///
/// The JSON representation uses camelCase field names matching the backend:
///
/// ```json
/// {
///   "id": "665f1c2e9b3a",
///   "firstName": "Amina",
///   "lastName": "Diallo",
///   "name": "Amina Diallo",
///   "email": "amina@example.com",
///   "role": "student",
///   "field": "engineering",
///   "isEmailVerified": true
/// }
/// ```
///
/// # Example
///
/// ```rust
/// use brainex_auth::{Role, User};
///
/// let user: User = serde_json::from_str(r#"{
///     "id": "1", "firstName": "Amina", "lastName": "Diallo",
///     "name": "Amina Diallo", "email": "amina@example.com",
///     "role": "student", "field": "engineering", "isEmailVerified": true
/// }"#).unwrap();
///
/// assert_eq!(user.role, Role::Student);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned user identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Full display name.
    pub name: String,
    /// Email address (unique per account).
    pub email: String,
    /// The user's role on the portal.
    pub role: Role,
    /// Field of study or mentorship, e.g. "engineering".
    #[serde(default)]
    pub field: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub is_email_verified: bool,
}

// Verify User is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<User>();
    assert_send_sync::<Role>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> User {
        User {
            id: "1".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            name: "Amina Diallo".to_string(),
            email: "amina@example.com".to_string(),
            role,
            field: Some("engineering".to_string()),
            is_email_verified: true,
        }
    }

    #[test]
    fn test_role_parses_known_values() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("mentor".parse::<Role>().unwrap(), Role::Mentor);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err.role, "superuser");
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in [Role::Student, Role::Mentor, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_admin_role_is_distinct() {
        // Only the admin variant satisfies an admin check; any other role fails it.
        assert_eq!(sample_user(Role::Admin).role, Role::Admin);
        assert_ne!(sample_user(Role::Student).role, Role::Admin);
        assert_ne!(sample_user(Role::Mentor).role, Role::Admin);
    }

    #[test]
    fn test_user_deserializes_camel_case() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "665f1c2e9b3a",
                "firstName": "Amina",
                "lastName": "Diallo",
                "name": "Amina Diallo",
                "email": "amina@example.com",
                "role": "mentor",
                "field": "medicine",
                "isEmailVerified": false
            }"#,
        )
        .unwrap();

        assert_eq!(user.first_name, "Amina");
        assert_eq!(user.role, Role::Mentor);
        assert_eq!(user.field.as_deref(), Some("medicine"));
        assert!(!user.is_email_verified);
    }

    #[test]
    fn test_user_tolerates_missing_optional_fields() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "1",
                "firstName": "A",
                "lastName": "B",
                "name": "A B",
                "email": "a@b.com",
                "role": "student"
            }"#,
        )
        .unwrap();

        assert!(user.field.is_none());
        assert!(!user.is_email_verified);
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(sample_user(Role::Student)).unwrap();
        assert_eq!(json["firstName"], "Amina");
        assert_eq!(json["isEmailVerified"], true);
        assert_eq!(json["role"], "student");
    }
}
