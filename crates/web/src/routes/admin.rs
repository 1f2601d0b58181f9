//! Shop management handlers.
//!
//! All handlers take [`RequireAdmin`] first, so anonymous requests are
//! redirected to the login page before anything is looked up or written.

#![allow(clippy::used_underscore_binding)]

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use shopkeep_core::ShopId;

use crate::db::ShopRepository;
use crate::error::{RepositoryResultExt, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::ShopSummary;
use crate::routes::IdPath;
use crate::routes::forms::{ShopForm, ShopFormValues, rejected};
use crate::state::AppState;

/// Management listing path, where shop mutations redirect.
const ADMIN_PATH: &str = "/admin";

/// Management listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminIndexTemplate {
    pub is_admin: bool,
    pub username: String,
    pub shops: Vec<ShopSummary>,
}

/// Shop create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/shop_form.html")]
pub struct ShopFormTemplate {
    pub is_admin: bool,
    pub title: &'static str,
    pub action: String,
    pub values: ShopFormValues,
    pub error: Option<String>,
}

impl ShopFormTemplate {
    fn add(values: ShopFormValues, error: Option<String>) -> Self {
        Self {
            is_admin: true,
            title: "Add shop",
            action: "/admin/add".to_string(),
            values,
            error,
        }
    }

    fn edit(id: ShopId, values: ShopFormValues, error: Option<String>) -> Self {
        Self {
            is_admin: true,
            title: "Edit shop",
            action: format!("/admin/edit/{id}"),
            values,
            error,
        }
    }
}

/// List shops with their product counts.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<AdminIndexTemplate> {
    let shops = ShopRepository::new(state.pool())
        .list_with_product_counts()
        .await?;

    Ok(AdminIndexTemplate {
        is_admin: true,
        username: admin.username,
        shops,
    })
}

/// Display the empty shop form.
#[instrument(skip(_admin))]
pub async fn new_shop(RequireAdmin(_admin): RequireAdmin) -> ShopFormTemplate {
    ShopFormTemplate::add(ShopFormValues::default(), None)
}

/// Create a shop.
#[instrument(skip(admin, state, form))]
pub async fn create_shop(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ShopForm>,
) -> Result<Response> {
    let input = match form.parse() {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected shop form");
            return Ok(rejected(ShopFormTemplate::add(
                form.values(),
                Some(e.to_string()),
            )));
        }
    };

    let shop = ShopRepository::new(state.pool()).create(&input).await?;

    let shop_id = shop.id.to_string();
    tracing::info!(shop_id = %shop_id, admin = %admin.username, "Shop created");
    add_breadcrumb("admin", "Created shop", Some(&[("shop_id", shop_id.as_str())]));

    Ok(Redirect::to(ADMIN_PATH).into_response())
}

/// Display the shop form pre-filled with the stored values.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
#[instrument(skip(_admin, state))]
pub async fn edit_shop(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(shop_id): IdPath<ShopId>,
) -> Result<ShopFormTemplate> {
    let shop = ShopRepository::new(state.pool())
        .get(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    Ok(ShopFormTemplate::edit(shop_id, ShopFormValues::from(&shop), None))
}

/// Overwrite a shop's fields.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
#[instrument(skip(admin, state, form))]
pub async fn update_shop(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(shop_id): IdPath<ShopId>,
    Form(form): Form<ShopForm>,
) -> Result<Response> {
    let repo = ShopRepository::new(state.pool());
    repo.get(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    let input = match form.parse() {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(shop_id = %shop_id, error = %e, "Rejected shop form");
            return Ok(rejected(ShopFormTemplate::edit(
                shop_id,
                form.values(),
                Some(e.to_string()),
            )));
        }
    };

    repo.update(shop_id, &input)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    tracing::info!(shop_id = %shop_id, admin = %admin.username, "Shop updated");
    add_breadcrumb(
        "admin",
        "Updated shop",
        Some(&[("shop_id", shop_id.to_string().as_str())]),
    );

    Ok(Redirect::to(ADMIN_PATH).into_response())
}

/// Delete a shop together with all of its products.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
#[instrument(skip(admin, state))]
pub async fn delete_shop(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(shop_id): IdPath<ShopId>,
) -> Result<Redirect> {
    let removed_products = ShopRepository::new(state.pool())
        .delete(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    tracing::info!(
        shop_id = %shop_id,
        removed_products,
        admin = %admin.username,
        "Shop deleted"
    );
    add_breadcrumb(
        "admin",
        "Deleted shop",
        Some(&[("shop_id", shop_id.to_string().as_str())]),
    );

    Ok(Redirect::to(ADMIN_PATH))
}
