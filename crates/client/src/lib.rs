//! Service booking client library.
//!
//! Session handling, resource caches and navigation guards for the service
//! booking API. Storage and navigation are injected through the
//! [`SessionStorage`] and [`Navigator`] traits so the same stores back the
//! CLI and the tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod guards;
pub mod http;
pub mod navigation;
pub mod resources;
pub mod session;
pub mod state;
pub mod storage;

pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, Result};
pub use guards::{Decision, admin_gate, route_guard};
pub use http::{ApiClient, ApiFailure};
pub use navigation::{History, Navigator, Router};
pub use resources::ResourceStore;
pub use session::{SessionState, SessionStore};
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, PersistenceError, SessionStorage};
