//! Session store.
//!
//! Holds the bearer token and the signed-in user, restores them from durable
//! storage at start-up and writes them back on login or registration.
//!
//! # Invariants
//!
//! Token and user are replaced together under one lock, so every reader sees
//! either both or neither. `is_authenticated` and `is_admin` are derived from
//! them on every read instead of being stored separately.
//!
//! Logout is purely local: the token is forgotten but never revoked on the
//! server.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use service_booking_core::{AuthPayload, Credentials, Registration, User};

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::navigation::{LOGIN_PATH, Navigator};
use crate::storage::{AUTH_TOKEN_KEY, PersistenceError, SessionStorage, USER_KEY};

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";

/// Authorization flags derived from the session, as seen by the guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl SessionState {
    /// Anonymous visitor.
    pub const ANONYMOUS: Self = Self {
        is_authenticated: false,
        is_admin: false,
    };
}

#[derive(Default)]
struct Session {
    token: Option<SecretString>,
    user: Option<User>,
}

impl Session {
    fn state(&self) -> SessionState {
        SessionState {
            is_authenticated: self.token.is_some(),
            is_admin: self.user.as_ref().is_some_and(|u| u.is_admin),
        }
    }
}

/// The process-wide session.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    api: ApiClient,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    session: RwLock<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("api", &self.inner.api)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an empty session. Call [`initialize`](Self::initialize) to
    /// restore a persisted one.
    #[must_use]
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                api,
                storage,
                navigator,
                session: RwLock::new(Session::default()),
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restore the session from durable storage.
    ///
    /// Returns `true` when a session was restored. Missing entries, a corrupt
    /// backing store or a stored user that no longer parses leave the session
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage backend cannot be read.
    pub async fn initialize(&self) -> Result<bool, PersistenceError> {
        let storage = &self.inner.storage;
        let entries = storage
            .get(AUTH_TOKEN_KEY)
            .and_then(|token| Ok((token, storage.get(USER_KEY)?)));
        let (token, raw_user) = match entries {
            Ok(entries) => entries,
            Err(e @ PersistenceError::Corrupt { .. }) => {
                warn!(error = %e, "Persisted session is unreadable, starting signed out");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            debug!("No persisted session");
            return Ok(false);
        };

        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Persisted user is unreadable, starting signed out");
                return Ok(false);
            }
        };

        info!(user_id = %user.id, is_admin = user.is_admin, "Session restored");
        *self.inner.session.write().await = Session {
            token: Some(SecretString::from(token)),
            user: Some(user),
        };
        Ok(true)
    }

    /// Sign in with email and password.
    ///
    /// On failure the current session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` with the server's message (or
    /// `"Login failed"`) when the server rejects the credentials or cannot be
    /// reached, and `ClientError::Persistence` if the new session cannot be
    /// stored.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<()> {
        let credentials = Credentials {
            email,
            password: password.expose_secret(),
        };

        let payload: AuthPayload = self
            .inner
            .api
            .post("/login", None, &credentials)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login rejected");
                ClientError::Auth(e.message_or(LOGIN_FALLBACK))
            })?;

        self.set_auth(payload.user, SecretString::from(payload.token))
            .await?;
        Ok(())
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` with the server's message (or
    /// `"Registration failed"`) when the server rejects the registration or
    /// cannot be reached, and `ClientError::Persistence` if the new session
    /// cannot be stored.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let payload: AuthPayload = self
            .inner
            .api
            .post("/register", None, registration)
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration rejected");
                ClientError::Auth(e.message_or(REGISTER_FALLBACK))
            })?;

        self.set_auth(payload.user, SecretString::from(payload.token))
            .await?;
        Ok(())
    }

    /// Replace the session and persist it.
    ///
    /// The in-memory session is replaced even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage backend cannot be written.
    pub async fn set_auth(&self, user: User, token: SecretString) -> Result<(), PersistenceError> {
        let raw_user = serde_json::to_string(&user)?;
        let raw_token = token.expose_secret().to_string();

        info!(user_id = %user.id, is_admin = user.is_admin, "Signed in");
        *self.inner.session.write().await = Session {
            token: Some(token),
            user: Some(user),
        };

        self.inner.storage.set(AUTH_TOKEN_KEY, &raw_token)?;
        self.inner.storage.set(USER_KEY, &raw_user)
    }

    /// Forget the session in memory and in durable storage.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage backend cannot be written.
    /// The in-memory session is cleared regardless.
    pub async fn clear_auth(&self) -> Result<(), PersistenceError> {
        *self.inner.session.write().await = Session::default();

        let token_removed = self.inner.storage.remove(AUTH_TOKEN_KEY);
        let user_removed = self.inner.storage.remove(USER_KEY);
        token_removed.and(user_removed)
    }

    /// Sign out locally and send the user to the login page.
    ///
    /// The token is not revoked on the server.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the stored session cannot be removed.
    /// The in-memory session is cleared and the redirect issued regardless.
    pub async fn logout(&self) -> Result<(), PersistenceError> {
        let cleared = self.clear_auth().await;
        info!("Signed out");
        self.inner.navigator.navigate_to(LOGIN_PATH);
        cleared
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current bearer token.
    pub async fn token(&self) -> Option<SecretString> {
        self.inner.session.read().await.token.clone()
    }

    /// Current user.
    pub async fn user(&self) -> Option<User> {
        self.inner.session.read().await.user.clone()
    }

    /// Whether a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.session.read().await.token.is_some()
    }

    /// Whether the current user is an administrator.
    pub async fn is_admin(&self) -> bool {
        self.snapshot().await.is_admin
    }

    /// Authorization flags for the guards.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.session.read().await.state()
    }
}
