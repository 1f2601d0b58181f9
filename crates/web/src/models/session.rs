//! Session-related types for admin authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-stored admin claim.
///
/// Its presence in the session is what makes the session authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Username the session logged in with.
    pub username: String,
    /// When the login happened.
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentAdmin {
    /// Build the claim for a login happening now.
    #[must_use]
    pub fn logged_in_now(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
