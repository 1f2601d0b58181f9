//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, signed cookie, `SQLite` store)
//!
//! Admin gating is not a layer: handlers take the [`RequireAdmin`] extractor.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAdmin, RequireAdmin, clear_current_admin, set_current_admin};
pub use request_id::request_id_middleware;
pub use session::{SessionLayer, create_session_layer, create_session_store};
