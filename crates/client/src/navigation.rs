//! Navigation: where the client sends the user after a guard decision.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::guards::{Decision, admin_gate, route_guard};
use crate::session::SessionStore;

/// Sign-in page.
pub const LOGIN_PATH: &str = "/login";
/// Sign-up page.
pub const REGISTER_PATH: &str = "/register";
/// Landing page.
pub const HOME_PATH: &str = "/";
/// Prefix of every admin-only page.
pub const ADMIN_PREFIX: &str = "/admin";

/// Receives navigation requests.
pub trait Navigator: Send + Sync {
    /// Move to `path`.
    fn navigate_to(&self, path: &str);
}

/// Navigator that records every path it is sent, in order.
#[derive(Debug, Default)]
pub struct History {
    visited: Mutex<Vec<String>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path navigated to so far.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }

    /// The current location.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.visited.lock().ok().and_then(|paths| paths.last().cloned())
    }
}

impl Navigator for History {
    fn navigate_to(&self, path: &str) {
        match self.visited.lock() {
            Ok(mut paths) => paths.push(path.to_string()),
            Err(_) => warn!(path, "Navigation history lock poisoned, dropping entry"),
        }
    }
}

/// Applies the guards to every navigation attempt.
#[derive(Clone)]
pub struct Router {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl Router {
    #[must_use]
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Navigate to `target`, or wherever the route guard redirects.
    pub async fn visit(&self, target: &str) -> Decision {
        let decision = route_guard(target, &self.session.snapshot().await);
        self.follow(target, decision)
    }

    /// Navigate to an admin page. The admin gate runs after the route guard.
    pub async fn visit_admin(&self, target: &str) -> Decision {
        let mut decision = route_guard(target, &self.session.snapshot().await);
        if decision == Decision::Allow {
            decision = admin_gate(self.session.user().await.as_ref());
        }
        self.follow(target, decision)
    }

    fn follow(&self, target: &str, decision: Decision) -> Decision {
        let destination = match &decision {
            Decision::Allow => target,
            Decision::RedirectTo(path) => {
                debug!(requested = target, redirect = %path, "Navigation redirected");
                path.as_str()
            }
        };
        self.navigator.navigate_to(destination);
        decision
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;
    use crate::config::ClientConfig;
    use crate::http::ApiClient;
    use crate::storage::MemoryStorage;

    fn router() -> (Router, SessionStore, Arc<History>) {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        let history = Arc::new(History::new());
        let session = SessionStore::new(
            ApiClient::new(&config).unwrap(),
            Arc::new(MemoryStorage::new()),
            history.clone(),
        );
        (Router::new(session.clone(), history.clone()), session, history)
    }

    async fn sign_in(session: &SessionStore, is_admin: bool) {
        let user = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@example.com",
            "is_admin": is_admin
        }))
        .unwrap();
        session.set_auth(user, SecretString::from("t")).await.unwrap();
    }

    #[test]
    fn test_history_records_in_order() {
        let history = History::new();
        assert!(history.last().is_none());
        history.navigate_to("/a");
        history.navigate_to("/b");
        assert_eq!(history.visited(), vec!["/a", "/b"]);
        assert_eq!(history.last().as_deref(), Some("/b"));
    }

    #[tokio::test]
    async fn test_anonymous_visit_lands_on_login() {
        let (router, _, history) = router();
        let decision = router.visit("/bookings").await;
        assert_eq!(decision, Decision::RedirectTo(LOGIN_PATH.to_string()));
        assert_eq!(history.last().as_deref(), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn test_visit_rereads_session() {
        let (router, session, history) = router();
        assert!(router.visit("/bookings").await.is_redirect());

        sign_in(&session, false).await;
        assert_eq!(router.visit("/bookings").await, Decision::Allow);
        assert_eq!(history.visited(), vec![LOGIN_PATH, "/bookings"]);
    }

    #[tokio::test]
    async fn test_visit_admin_requires_admin_user() {
        let (router, session, history) = router();
        sign_in(&session, false).await;
        assert_eq!(
            router.visit_admin("/admin/services").await,
            Decision::RedirectTo(HOME_PATH.to_string())
        );

        sign_in(&session, true).await;
        assert_eq!(router.visit_admin("/admin/services").await, Decision::Allow);
        assert_eq!(history.visited(), vec![HOME_PATH, "/admin/services"]);
    }
}
