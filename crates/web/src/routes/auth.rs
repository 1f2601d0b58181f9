//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Where a successful login lands.
const AFTER_LOGIN_PATH: &str = "/admin";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub is_admin: bool,
    pub error: Option<String>,
    pub username: String,
}

/// Login form input.
///
/// Missing fields deserialize as empty strings and simply fail verification.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Display the login page.
pub async fn login_page(admin: OptionalAdmin) -> LoginTemplate {
    LoginTemplate {
        is_admin: admin.is_admin(),
        error: None,
        username: String::new(),
    }
}

/// Handle login form submission.
///
/// Both fields must match the configured admin credentials exactly. A
/// mismatch leaves the session untouched and redisplays the form.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if !state.config().admin.verify(&form.username, &form.password) {
        tracing::warn!(username = %form.username, "Admin login failed");
        return Ok(LoginTemplate {
            is_admin: admin.is_admin(),
            error: Some("Invalid credentials".to_string()),
            username: form.username,
        }
        .into_response());
    }

    let current = CurrentAdmin::logged_in_now(form.username);
    set_current_admin(&session, &current).await?;
    set_sentry_user(&current.username);

    tracing::info!(username = %current.username, "Admin logged in");
    Ok(Redirect::to(AFTER_LOGIN_PATH).into_response())
}

/// Log out and return to the shop listing.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();

    tracing::info!("Admin logged out");
    Ok(Redirect::to("/"))
}
