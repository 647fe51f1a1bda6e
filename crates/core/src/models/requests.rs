//! Request bodies sent to the booking API.
//!
//! Passwords are carried as plain `String`s here because they are serialized
//! straight into the request body; callers keep them in a secret wrapper
//! until the request is built. `Debug` output redacts them.

use core::fmt;

use serde::Serialize;

use crate::types::{Email, Price, ServiceId};

/// Login body.
#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration body.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    /// Registration where the confirmation repeats the password.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email,
            password_confirmation: password.clone(),
            password,
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// Body for creating a service (every field but the id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Partial update of a service. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ServiceUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
            && self.is_featured.is_none()
    }
}

/// Body for booking a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    pub service_id: ServiceId,
    pub booking_date: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_update_omits_absent_fields() {
        let update = ServiceUpdate {
            price: Some(Price::from_cents(3000)),
            is_active: Some(false),
            ..ServiceUpdate::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "price": 30.0, "is_active": false }));
        assert!(ServiceUpdate::default().is_empty());
    }

    #[test]
    fn test_registration_confirms_password() {
        let reg = Registration::new("Jane", Email::parse("jane@example.com").unwrap(), "s3cret!");
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json["password_confirmation"], "s3cret!");
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let creds = Credentials {
            email: "jane@example.com",
            password: "hunter2",
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
