//! Application state shared across the client.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::http::ApiClient;
use crate::navigation::{Navigator, Router};
use crate::resources::ResourceStore;
use crate::session::SessionStore;
use crate::storage::{PersistenceError, SessionStorage};

/// Application state shared by every part of the client.
///
/// This struct is cheaply cloneable via `Arc` and owns the single session
/// store, resource store and router of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    api: ApiClient,
    session: SessionStore,
    resources: ResourceStore,
    router: Router,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .field("resources", &self.inner.resources)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `storage` - Durable storage for the session
    /// * `navigator` - Receiver of redirects
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, reqwest::Error> {
        let api = ApiClient::new(&config)?;
        let session = SessionStore::new(api.clone(), storage, navigator.clone());
        let resources = ResourceStore::new(api.clone(), session.clone());
        let router = Router::new(session.clone(), navigator);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                session,
                resources,
                router,
            }),
        })
    }

    /// Restore a persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage backend cannot be read.
    pub async fn initialize(&self) -> Result<bool, PersistenceError> {
        self.inner.session.initialize().await
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the HTTP transport.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the resource store.
    #[must_use]
    pub fn resources(&self) -> &ResourceStore {
        &self.inner.resources
    }

    /// Get a reference to the router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.inner.router
    }
}
