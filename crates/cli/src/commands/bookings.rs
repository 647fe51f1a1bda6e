//! Booking commands.

use service_booking_client::AppState;
use service_booking_core::{NewBooking, ServiceId};

use super::print_json;

/// Print the signed-in user's bookings.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bookings = state.resources().fetch_user_bookings().await?;
    print_json(&bookings)?;
    Ok(())
}

/// Book a service for a date.
pub async fn create(
    state: &AppState,
    service_id: ServiceId,
    booking_date: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let booking = NewBooking {
        service_id,
        booking_date,
    };

    match state.resources().create_booking(&booking).await? {
        Some(created) => print_json(&created)?,
        None => tracing::info!("Booking created"),
    }
    Ok(())
}

/// Print every user's bookings.
pub async fn all(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bookings = state.resources().fetch_all_bookings().await?;
    print_json(&bookings)?;
    Ok(())
}
