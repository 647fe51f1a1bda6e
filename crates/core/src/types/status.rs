//! Booking status label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status of a booking as reported by the API.
///
/// The server owns the set of statuses, so this is an open label rather than
/// an enum: unknown values decode and round-trip unchanged. The well-known
/// labels are available as constants for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingStatus(String);

impl BookingStatus {
    /// Freshly created, awaiting confirmation.
    pub const PENDING: &'static str = "pending";
    /// Accepted by the provider.
    pub const CONFIRMED: &'static str = "confirmed";
    /// Cancelled by either side.
    pub const CANCELLED: &'static str = "cancelled";
    /// Service delivered.
    pub const COMPLETED: &'static str = "completed";

    /// Wrap a raw status label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The raw label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the booking is still awaiting confirmation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::PENDING)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for BookingStatus {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
