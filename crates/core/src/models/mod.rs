//! API entities and request payloads.
//!
//! Field names follow the booking API's snake_case JSON so the types
//! serialize without renames. Back-references (`bookings` on users and
//! services) are optional on the wire and default to empty.

pub mod booking;
pub mod page;
pub mod requests;
pub mod service;
pub mod user;

pub use booking::Booking;
pub use page::{Item, Listing, PageLink, PageLinks, PageMeta, Paginated};
pub use requests::{Credentials, NewBooking, NewService, Registration, ServiceUpdate};
pub use service::Service;
pub use user::{AuthPayload, User};
