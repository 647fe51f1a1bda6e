//! Session commands.

use std::io::BufRead;

use secrecy::{ExposeSecret, SecretString};
use service_booking_client::{AppState, ClientError};
use service_booking_core::{Email, Registration};
use thiserror::Error;

/// Errors specific to session commands.
#[derive(Debug, Error)]
pub enum AuthCommandError {
    /// No password on the command line, in the environment or on stdin.
    #[error("No password given: pass --password, set BOOKING_PASSWORD or pipe it on stdin")]
    MissingPassword,

    /// Stdin could not be read.
    #[error("Cannot read password from stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

/// Use the password given as flag or env var, else the first line of `input`.
///
/// # Errors
///
/// Returns an error if no password is given and `input` is empty or
/// unreadable.
pub fn resolve_password(
    given: Option<String>,
    mut input: impl BufRead,
) -> Result<SecretString, AuthCommandError> {
    if let Some(password) = given.filter(|p| !p.is_empty()) {
        return Ok(SecretString::from(password));
    }

    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(AuthCommandError::MissingPassword);
    }
    Ok(SecretString::from(password))
}

/// Sign in and persist the session.
pub async fn login(
    state: &AppState,
    email: &Email,
    password: &SecretString,
) -> Result<(), ClientError> {
    state.session().login(email.as_str(), password).await?;

    if let Some(user) = state.session().user().await {
        tracing::info!("Signed in as {} ({})", user.name, user.email);
    }
    Ok(())
}

/// Create an account and persist the resulting session.
pub async fn register(
    state: &AppState,
    name: String,
    email: Email,
    password: &SecretString,
) -> Result<(), ClientError> {
    let registration = Registration::new(name, email, password.expose_secret());
    state.session().register(&registration).await?;

    tracing::info!("Account created for {}", registration.email);
    Ok(())
}

/// Forget the stored session.
pub async fn logout(state: &AppState) -> Result<(), ClientError> {
    state.session().logout().await?;
    Ok(())
}

/// Print the signed-in user.
pub async fn whoami(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    match state.session().user().await {
        Some(user) => super::print_json(&user)?,
        None => tracing::warn!("Not signed in"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_given_password_wins_over_stdin() {
        let password = resolve_password(Some("flag".to_string()), "piped\n".as_bytes()).unwrap();
        assert_eq!(password.expose_secret(), "flag");
    }

    #[test]
    fn test_password_read_from_first_stdin_line() {
        let password = resolve_password(None, "piped pw\r\nignored\n".as_bytes()).unwrap();
        assert_eq!(password.expose_secret(), "piped pw");
    }

    #[test]
    fn test_missing_password_is_an_error() {
        assert!(matches!(
            resolve_password(None, "".as_bytes()),
            Err(AuthCommandError::MissingPassword)
        ));
        assert!(matches!(
            resolve_password(Some(String::new()), "\n".as_bytes()),
            Err(AuthCommandError::MissingPassword)
        ));
    }
}
