//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Booking;
use crate::types::{Email, UserId};

/// A registered user of the booking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
    /// When the email address was verified, if ever.
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Administrators may manage services and see every booking.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Bookings owned by this user, when the API embeds them.
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// Body returned by the login and registration endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_admin_defaults_to_false() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Jane",
            "email": "jane@example.com"
        }))
        .unwrap();

        assert!(!user.is_admin);
        assert!(user.bookings.is_empty());
        assert!(user.email_verified_at.is_none());
    }

    #[test]
    fn test_decodes_api_timestamps() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Admin",
            "email": "admin@example.com",
            "email_verified_at": null,
            "is_admin": true,
            "created_at": "2025-07-15T09:30:00.000000Z",
            "updated_at": "2025-07-16T10:00:00.000000Z"
        }))
        .unwrap();

        assert!(user.is_admin);
        assert_eq!(
            user.created_at.unwrap().to_rfc3339(),
            "2025-07-15T09:30:00+00:00"
        );
    }
}
