//! Navigation guards.
//!
//! Pure decision functions over the session. They never navigate themselves;
//! the [`Router`](crate::navigation::Router) acts on the decision.

use service_booking_core::User;

use crate::navigation::{ADMIN_PREFIX, HOME_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::session::SessionState;

/// Outcome of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to the requested page.
    Allow,
    /// Go to this path instead.
    RedirectTo(String),
}

impl Decision {
    fn redirect(path: &str) -> Self {
        Self::RedirectTo(path.to_string())
    }

    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::RedirectTo(_))
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::RedirectTo(path) => write!(f, "redirect to {path}"),
        }
    }
}

fn is_auth_route(target: &str) -> bool {
    target == LOGIN_PATH || target == REGISTER_PATH
}

/// Decide whether a navigation to `target` may proceed.
///
/// Rules apply in order and the first match wins:
/// 1. signed out, target is not an auth page: go to `/login`
/// 2. signed in, target is an auth page: go to `/`
/// 3. target is under `/admin`, user is not an admin: go to `/`
/// 4. otherwise allow
#[must_use]
pub fn route_guard(target: &str, state: &SessionState) -> Decision {
    let auth_route = is_auth_route(target);

    if !state.is_authenticated && !auth_route {
        return Decision::redirect(LOGIN_PATH);
    }
    if state.is_authenticated && auth_route {
        return Decision::redirect(HOME_PATH);
    }
    if target.starts_with(ADMIN_PREFIX) && !state.is_admin {
        return Decision::redirect(HOME_PATH);
    }
    Decision::Allow
}

/// Per-page check for admin pages: only a loaded admin user passes.
#[must_use]
pub fn admin_gate(user: Option<&User>) -> Decision {
    match user {
        Some(user) if user.is_admin => Decision::Allow,
        _ => Decision::redirect(HOME_PATH),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const fn state(is_authenticated: bool, is_admin: bool) -> SessionState {
        SessionState {
            is_authenticated,
            is_admin,
        }
    }

    fn user(is_admin: bool) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Sam",
            "email": "sam@example.com",
            "is_admin": is_admin
        }))
        .unwrap()
    }

    fn home() -> Decision {
        Decision::RedirectTo("/".to_string())
    }

    fn login() -> Decision {
        Decision::RedirectTo("/login".to_string())
    }

    #[test]
    fn test_route_guard_matrix() {
        let anon = state(false, false);
        let member = state(true, false);
        let admin = state(true, true);

        let cases = [
            ("/", anon, login()),
            ("/bookings", anon, login()),
            ("/admin", anon, login()),
            ("/login", anon, Decision::Allow),
            ("/register", anon, Decision::Allow),
            ("/login", member, home()),
            ("/register", admin, home()),
            ("/", member, Decision::Allow),
            ("/services", member, Decision::Allow),
            ("/admin", member, home()),
            ("/admin/bookings", member, home()),
            ("/admin/bookings", admin, Decision::Allow),
            ("/bookings", admin, Decision::Allow),
        ];

        for (target, session, expected) in cases {
            assert_eq!(route_guard(target, &session), expected, "{target} as {session:?}");
        }
    }

    #[test]
    fn test_auth_rule_precedes_admin_rule() {
        // An anonymous admin flag cannot happen in practice, but rule 1 still wins.
        assert_eq!(route_guard("/admin", &state(false, true)), login());
    }

    #[test]
    fn test_admin_prefix_is_plain_prefix() {
        assert_eq!(route_guard("/administrator", &state(true, false)), home());
    }

    #[test]
    fn test_admin_gate() {
        assert_eq!(admin_gate(None), home());
        assert_eq!(admin_gate(Some(&user(false))), home());
        assert_eq!(admin_gate(Some(&user(true))), Decision::Allow);
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::Allow.to_string(), "allow");
        assert_eq!(login().to_string(), "redirect to /login");
        assert!(login().is_redirect());
    }
}
