//! Bookings of a service by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Service, User};
use crate::types::{BookingId, BookingStatus, ServiceId, UserId};

/// A booking of one service by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    /// Date (or date-time) as formatted by the server.
    pub booking_date: String,
    /// Absent when the server omits it.
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Embedded owner (admin listings).
    #[serde(default)]
    pub user: Option<User>,
    /// Embedded service.
    #[serde(default)]
    pub service: Option<Service>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_embedded_relations() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": 10,
            "user_id": 1,
            "service_id": 3,
            "booking_date": "2025-08-01",
            "status": "confirmed",
            "user": { "id": 1, "name": "Jane", "email": "jane@example.com" },
            "service": { "id": 3, "name": "Haircut", "price": "25.00" }
        }))
        .unwrap();

        assert_eq!(booking.status.unwrap(), BookingStatus::CONFIRMED);
        assert_eq!(booking.user.unwrap().name, "Jane");
        assert_eq!(booking.service.unwrap().id, ServiceId::new(3));
    }

    #[test]
    fn test_null_relations_are_none() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": 11,
            "user_id": 1,
            "service_id": 3,
            "booking_date": "2025-08-02 14:00:00",
            "status": "pending",
            "user": null,
            "service": null
        }))
        .unwrap();

        assert!(booking.user.is_none());
        assert!(booking.service.is_none());
        assert!(booking.status.is_some_and(|s| s.is_pending()));
    }

    #[test]
    fn test_missing_status_stays_absent() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": 12,
            "user_id": 1,
            "service_id": 3,
            "booking_date": "2025-08-03"
        }))
        .unwrap();

        assert!(booking.status.is_none());
    }

    #[test]
    fn test_plain_timestamps_decode() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": 13,
            "user_id": 1,
            "service_id": 3,
            "booking_date": "2025-08-04",
            "status": "pending",
            "created_at": "2026-01-05 10:00:00",
            "updated_at": "not a date"
        }))
        .unwrap();

        assert_eq!(
            booking.created_at.unwrap().to_rfc3339(),
            "2026-01-05T10:00:00+00:00"
        );
        assert!(booking.updated_at.is_none());
    }
}
