//! Bookable services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Booking;
use crate::types::{Price, ServiceId};

/// A service offered for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Inactive services are hidden from customers.
    #[serde(default)]
    pub is_active: bool,
    /// Featured services are highlighted on the landing page.
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Bookings made for this service, when the API embeds them.
    #[serde(default)]
    pub bookings: Vec<Booking>,
}
