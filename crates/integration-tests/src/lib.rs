//! Integration tests for the service booking client.
//!
//! Every test drives a full [`AppState`] against a [`MockServer`] standing in
//! for the booking API, with in-memory session storage and a recording
//! navigator.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p service-booking-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use serde_json::{Value, json};
use service_booking_client::{AppState, ClientConfig, History, MemoryStorage, SessionStorage};
use url::Url;
use wiremock::MockServer;

/// A client wired to a mock API.
pub struct TestContext {
    pub server: MockServer,
    pub storage: MemoryStorage,
    pub history: Arc<History>,
    pub state: AppState,
}

impl TestContext {
    /// Start a mock API and build an uninitialized client against it.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub async fn new() -> Self {
        Self::with_storage(MemoryStorage::new()).await
    }

    /// Like [`new`](Self::new), but over pre-populated storage.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub async fn with_storage(storage: MemoryStorage) -> Self {
        let server = MockServer::start().await;
        let history = Arc::new(History::new());
        let state = AppState::new(
            config_for(&server),
            Arc::new(storage.clone()),
            history.clone(),
        )
        .expect("Failed to build client");

        Self {
            server,
            storage,
            history,
            state,
        }
    }

    /// Store a session the way a previous run would have left it.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory storage lock is poisoned.
    pub fn persist_session(&self, token: &str, user: &Value) {
        self.storage
            .set("auth_token", token)
            .expect("Failed to store token");
        self.storage
            .set("user", &user.to_string())
            .expect("Failed to store user");
    }
}

/// Client configuration pointing at the mock API.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn config_for(server: &MockServer) -> ClientConfig {
    let base = Url::parse(&format!("{}/api", server.uri())).expect("Invalid mock server URI");
    ClientConfig::new(base)
}

// ============================================================================
// Fixtures
// ============================================================================

/// A user as the API returns it.
#[must_use]
pub fn user_json(id: i64, is_admin: bool) -> Value {
    json!({
        "id": id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "email_verified_at": null,
        "is_admin": is_admin,
        "created_at": "2026-01-05T10:00:00.000000Z",
        "updated_at": "2026-01-05T10:00:00.000000Z"
    })
}

/// A service as the API returns it.
#[must_use]
pub fn service_json(id: i64, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} session"),
        "price": price,
        "is_active": true,
        "is_featured": false,
        "created_at": "2026-01-05T10:00:00.000000Z",
        "updated_at": "2026-01-05T10:00:00.000000Z"
    })
}

/// A booking as the API returns it.
#[must_use]
pub fn booking_json(id: i64, user_id: i64, service_id: i64, date: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "service_id": service_id,
        "booking_date": date,
        "status": "pending",
        "created_at": "2026-01-05T10:00:00.000000Z",
        "updated_at": "2026-01-05T10:00:00.000000Z"
    })
}

/// A paginated list envelope around `items`.
#[must_use]
pub fn page_of(items: &[Value]) -> Value {
    json!({
        "data": items,
        "meta": {
            "current_page": 1,
            "from": 1,
            "last_page": 1,
            "path": "/api/bookings",
            "per_page": 15,
            "to": items.len(),
            "total": items.len()
        },
        "links": { "first": null, "last": null, "prev": null, "next": null }
    })
}
