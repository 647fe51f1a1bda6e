//! Service commands.

use service_booking_client::AppState;
use service_booking_core::{NewService, ServiceId, ServiceUpdate};
use thiserror::Error;

use super::print_json;

/// Errors specific to service commands.
#[derive(Debug, Error)]
pub enum ServiceCommandError {
    /// `services update` was called without any field to change.
    #[error("Nothing to update: pass at least one field")]
    EmptyUpdate,
}

/// Print every service.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let services = state.resources().fetch_services().await?;
    print_json(&services)?;
    Ok(())
}

/// Create a service and print it.
pub async fn create(
    state: &AppState,
    service: &NewService,
) -> Result<(), Box<dyn std::error::Error>> {
    match state.resources().create_service(service).await? {
        Some(created) => print_json(&created)?,
        None => tracing::info!("Service created"),
    }
    Ok(())
}

/// Update a service and print it.
pub async fn update(
    state: &AppState,
    id: ServiceId,
    update: &ServiceUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    if update.is_empty() {
        return Err(ServiceCommandError::EmptyUpdate.into());
    }

    match state.resources().update_service(id, update).await? {
        Some(updated) => print_json(&updated)?,
        None => tracing::info!("Service {id} updated"),
    }
    Ok(())
}

/// Delete a service.
pub async fn delete(state: &AppState, id: ServiceId) -> Result<(), Box<dyn std::error::Error>> {
    state.resources().delete_service(id).await?;
    tracing::info!("Service {id} deleted");
    Ok(())
}
