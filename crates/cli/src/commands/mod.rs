//! Command implementations.
//!
//! Each command prints its result as pretty JSON on stdout; diagnostics go to
//! stderr through `tracing`.

pub mod auth;
pub mod bookings;
pub mod services;

use serde::Serialize;
use service_booking_client::{AppState, Decision, History};

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Evaluate the navigation guards for `path` and print where it leads.
#[allow(clippy::print_stdout)]
pub async fn visit(state: &AppState, history: &History, path: &str, admin: bool) {
    let decision = if admin {
        state.router().visit_admin(path).await
    } else {
        state.router().visit(path).await
    };

    let landed = history.last().unwrap_or_else(|| path.to_string());
    tracing::debug!(%decision, landed = %landed, "Guards evaluated");

    match decision {
        Decision::Allow => println!("{path}: allowed"),
        Decision::RedirectTo(_) => println!("{path}: redirected to {landed}"),
    }
}
