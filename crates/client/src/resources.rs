//! Resource store.
//!
//! In-memory caches of services and bookings plus the operations that keep
//! them in sync with the API. Fetches replace a cache wholesale; mutations
//! never patch it but re-fetch after the server accepts the change.
//!
//! Every operation raises the `loading` flag for its duration, clears
//! `last_error` on entry and records it on failure before returning the
//! error to the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use service_booking_core::{
    Booking, Item, Listing, NewBooking, NewService, Service, ServiceId, ServiceUpdate,
};

use crate::error::{ClientError, Result};
use crate::http::{ApiClient, ApiFailure};
use crate::session::SessionStore;

// =============================================================================
// Fallback messages
// =============================================================================

const FETCH_SERVICES_FAILED: &str = "Failed to fetch services";
const CREATE_SERVICE_FAILED: &str = "Failed to create service";
const UPDATE_SERVICE_FAILED: &str = "Failed to update service";
const DELETE_SERVICE_FAILED: &str = "Failed to delete service";
const FETCH_BOOKINGS_FAILED: &str = "Failed to fetch bookings";
const CREATE_BOOKING_FAILED: &str = "Failed to create booking";
const FETCH_ALL_BOOKINGS_FAILED: &str = "Failed to fetch all bookings";

/// Services and bookings caches.
///
/// Cheap to clone; clones share the same caches.
#[derive(Clone)]
pub struct ResourceStore {
    inner: Arc<ResourceStoreInner>,
}

struct ResourceStoreInner {
    api: ApiClient,
    session: SessionStore,
    services: RwLock<Vec<Service>>,
    bookings: RwLock<Vec<Booking>>,
    loading: AtomicBool,
    last_error: RwLock<Option<String>>,
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

/// Lowers the `loading` flag when dropped, on every exit path.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl ResourceStore {
    /// Create a store with empty caches. Requests carry the session's token.
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ResourceStoreInner {
                api,
                session,
                services: RwLock::new(Vec::new()),
                bookings: RwLock::new(Vec::new()),
                loading: AtomicBool::new(false),
                last_error: RwLock::new(None),
            }),
        }
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Replace the services cache with the server's list.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the request fails; the cache is left
    /// as it was.
    #[instrument(skip(self))]
    pub async fn fetch_services(&self) -> Result<Vec<Service>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;
        self.load_services(token.as_ref()).await
    }

    /// Create a service, then refresh the services cache.
    ///
    /// Returns the server's representation of the new service, if it sent one.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the creation or the follow-up fetch
    /// fails.
    #[instrument(skip(self, service), fields(name = %service.name))]
    pub async fn create_service(&self, service: &NewService) -> Result<Option<Service>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;

        let response: Result<Option<Value>, ApiFailure> = self
            .inner
            .api
            .post("/services", token.as_ref(), service)
            .await;
        let created = match accepted::<Service>(response, "service") {
            Ok(created) => created,
            Err(e) => return Err(self.fail(&e, CREATE_SERVICE_FAILED).await),
        };

        self.load_services(token.as_ref()).await?;
        Ok(created)
    }

    /// Apply a partial update to a service, then refresh the services cache.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the update or the follow-up fetch
    /// fails.
    #[instrument(skip(self, update), fields(service_id = %id))]
    pub async fn update_service(
        &self,
        id: ServiceId,
        update: &ServiceUpdate,
    ) -> Result<Option<Service>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;

        let response: Result<Option<Value>, ApiFailure> = self
            .inner
            .api
            .put(&format!("/services/{id}"), token.as_ref(), update)
            .await;
        let updated = match accepted::<Service>(response, "service") {
            Ok(updated) => updated,
            Err(e) => return Err(self.fail(&e, UPDATE_SERVICE_FAILED).await),
        };

        self.load_services(token.as_ref()).await?;
        Ok(updated)
    }

    /// Delete a service, then refresh the services cache.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the deletion or the follow-up fetch
    /// fails.
    #[instrument(skip(self), fields(service_id = %id))]
    pub async fn delete_service(&self, id: ServiceId) -> Result<()> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;

        if let Err(e) = self
            .inner
            .api
            .delete(&format!("/services/{id}"), token.as_ref())
            .await
        {
            return Err(self.fail(&e, DELETE_SERVICE_FAILED).await);
        }

        self.load_services(token.as_ref()).await?;
        Ok(())
    }

    // =========================================================================
    // Bookings
    // =========================================================================

    /// Replace the bookings cache with the current user's bookings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the request fails; the cache is left
    /// as it was.
    #[instrument(skip(self))]
    pub async fn fetch_user_bookings(&self) -> Result<Vec<Booking>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;
        self.load_bookings("/bookings", token.as_ref(), FETCH_BOOKINGS_FAILED)
            .await
    }

    /// Book a service, then refresh the current user's bookings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the booking or the follow-up fetch
    /// fails.
    #[instrument(skip(self, booking), fields(service_id = %booking.service_id))]
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;

        let response: Result<Option<Value>, ApiFailure> = self
            .inner
            .api
            .post("/bookings", token.as_ref(), booking)
            .await;
        let created = match accepted::<Booking>(response, "booking") {
            Ok(created) => created,
            Err(e) => return Err(self.fail(&e, CREATE_BOOKING_FAILED).await),
        };

        self.load_bookings("/bookings", token.as_ref(), FETCH_BOOKINGS_FAILED)
            .await?;
        Ok(created)
    }

    /// Replace the bookings cache with every user's bookings (admin view).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the request fails; the cache is left
    /// as it was.
    #[instrument(skip(self))]
    pub async fn fetch_all_bookings(&self) -> Result<Vec<Booking>> {
        let _loading = self.begin().await;
        let token = self.inner.session.token().await;
        self.load_bookings("/admin/bookings", token.as_ref(), FETCH_ALL_BOOKINGS_FAILED)
            .await
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Cached services.
    pub async fn services(&self) -> Vec<Service> {
        self.inner.services.read().await.clone()
    }

    /// Cached bookings.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.inner.bookings.read().await.clone()
    }

    /// Whether an operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Message of the last failed operation, cleared when the next one starts.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.last_error.read().await.clone()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn begin(&self) -> LoadingGuard<'_> {
        self.inner.loading.store(true, Ordering::SeqCst);
        *self.inner.last_error.write().await = None;
        LoadingGuard {
            flag: &self.inner.loading,
        }
    }

    async fn fail(&self, failure: &ApiFailure, fallback: &str) -> ClientError {
        let message = failure.message_or(fallback);
        warn!(error = %failure, message = %message, "API request failed");
        *self.inner.last_error.write().await = Some(message.clone());
        ClientError::Request(message)
    }

    async fn load_services(&self, token: Option<&SecretString>) -> Result<Vec<Service>> {
        let services = match self
            .inner
            .api
            .get::<Listing<Service>>("/services", token)
            .await
        {
            Ok(listing) => listing.into_items(),
            Err(e) => return Err(self.fail(&e, FETCH_SERVICES_FAILED).await),
        };

        debug!(count = services.len(), "Services cache replaced");
        (*self.inner.services.write().await).clone_from(&services);
        Ok(services)
    }

    async fn load_bookings(
        &self,
        path: &str,
        token: Option<&SecretString>,
        fallback: &str,
    ) -> Result<Vec<Booking>> {
        let bookings = match self.inner.api.get::<Listing<Booking>>(path, token).await {
            Ok(listing) => listing.into_items(),
            Err(e) => return Err(self.fail(&e, fallback).await),
        };

        debug!(count = bookings.len(), path, "Bookings cache replaced");
        (*self.inner.bookings.write().await).clone_from(&bookings);
        Ok(bookings)
    }
}

/// Interpret the response to an accepted mutation.
///
/// Any 2xx counts as accepted. The entity is read from the bare body, a
/// `{ "data": ... }` wrapper or a `{ "<key>": ... }` member; a body in any
/// other shape (or no body) yields `None`.
fn accepted<T: DeserializeOwned>(
    response: Result<Option<Value>, ApiFailure>,
    key: &str,
) -> Result<Option<T>, ApiFailure> {
    let body = match response {
        Ok(Some(body)) => body,
        Ok(None) => return Ok(None),
        Err(ApiFailure::Decode(e)) => {
            debug!(error = %e, "Accepted response is not JSON");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let member = body.get(key).cloned();
    if let Ok(item) = serde_json::from_value::<Item<T>>(body) {
        return Ok(Some(item.into_inner()));
    }
    match member.map(serde_json::from_value::<T>) {
        Some(Ok(entity)) => Ok(Some(entity)),
        _ => {
            debug!(key, "Accepted response carries no readable entity");
            Ok(None)
        }
    }
}
