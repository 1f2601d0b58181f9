//! Authentication extractors for the admin session.
//!
//! The session is authenticated exactly when it holds a [`CurrentAdmin`]
//! claim. The claim is read on every request; nothing is cached in-process.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Path of the login page that anonymous admin requests are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Extractor that requires an authenticated admin session.
///
/// Put it first in a handler's argument list so the redirect happens before
/// any path lookup or form parsing.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when an admin session is required but absent.
pub enum AdminAuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// The session layer is not installed.
    SessionUnavailable,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::SessionUnavailable)?;

        let admin: CurrentAdmin = read_admin(session)
            .await
            .ok_or_else(|| {
                tracing::debug!(path = %parts.uri.path(), "anonymous request to admin route");
                AdminAuthRejection::RedirectToLogin
            })?;

        Ok(Self(admin))
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdmin`, this never rejects; public pages use it to decide
/// whether to show management links.
pub struct OptionalAdmin(pub Option<CurrentAdmin>);

impl OptionalAdmin {
    /// Whether the request carries an authenticated admin session.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => read_admin(session).await,
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Read the admin claim, treating an unreadable session as anonymous.
async fn read_admin(session: &Session) -> Option<CurrentAdmin> {
    match session.get::<CurrentAdmin>(session_keys::CURRENT_ADMIN).await {
        Ok(admin) => admin,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read admin session, treating request as anonymous");
            None
        }
    }
}

/// Store the admin claim in the session (login).
///
/// The session id is rotated first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Remove the admin claim from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_read_admin_returns_stored_claim() {
        let session = fresh_session();
        set_current_admin(&session, &CurrentAdmin::logged_in_now("admin"))
            .await
            .unwrap();

        let admin = read_admin(&session).await.unwrap();
        assert_eq!(admin.username, "admin");
    }

    #[tokio::test]
    async fn test_read_admin_unreadable_claim_is_anonymous() {
        let session = fresh_session();
        session
            .insert(session_keys::CURRENT_ADMIN, "not a claim")
            .await
            .unwrap();

        assert!(read_admin(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_read_admin_after_logout_is_anonymous() {
        let session = fresh_session();
        set_current_admin(&session, &CurrentAdmin::logged_in_now("admin"))
            .await
            .unwrap();
        clear_current_admin(&session).await.unwrap();

        assert!(read_admin(&session).await.is_none());
    }
}
