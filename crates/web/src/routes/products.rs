//! Product management handlers.
//!
//! Every mutation redirects back to the owning shop's public page.

#![allow(clippy::used_underscore_binding)]

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use shopkeep_core::{ProductId, ShopId};

use crate::db::{ProductRepository, ShopRepository};
use crate::error::{RepositoryResultExt, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::Shop;
use crate::routes::IdPath;
use crate::routes::forms::{ProductForm, ProductFormValues, rejected};
use crate::state::AppState;

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub is_admin: bool,
    pub title: &'static str,
    pub action: String,
    pub shop: Shop,
    pub values: ProductFormValues,
    pub error: Option<String>,
}

impl ProductFormTemplate {
    fn add(shop: Shop, values: ProductFormValues, error: Option<String>) -> Self {
        Self {
            is_admin: true,
            title: "Add product",
            action: format!("/admin/shop/{}/add_product", shop.id),
            shop,
            values,
            error,
        }
    }

    fn edit(
        id: ProductId,
        shop: Shop,
        values: ProductFormValues,
        error: Option<String>,
    ) -> Self {
        Self {
            is_admin: true,
            title: "Edit product",
            action: format!("/admin/product/edit/{id}"),
            shop,
            values,
            error,
        }
    }
}

fn shop_page(shop_id: ShopId) -> Redirect {
    Redirect::to(&format!("/shop/{shop_id}"))
}

/// Display the empty product form for a shop.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
#[instrument(skip(_admin, state))]
pub async fn new_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(shop_id): IdPath<ShopId>,
) -> Result<ProductFormTemplate> {
    let shop = ShopRepository::new(state.pool())
        .get(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    Ok(ProductFormTemplate::add(
        shop,
        ProductFormValues::default(),
        None,
    ))
}

/// Create a product under a shop.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist; nothing is written in that case.
#[instrument(skip(admin, state, form))]
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(shop_id): IdPath<ShopId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let shop = ShopRepository::new(state.pool())
        .get(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    let input = match form.parse() {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(shop_id = %shop_id, error = %e, "Rejected product form");
            return Ok(rejected(ProductFormTemplate::add(
                shop,
                form.values(),
                Some(e.to_string()),
            )));
        }
    };

    let product = ProductRepository::new(state.pool())
        .create(shop.id, &input)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    let product_id = product.id.to_string();
    tracing::info!(
        product_id = %product_id,
        shop_id = %shop_id,
        admin = %admin.username,
        "Product created"
    );
    add_breadcrumb(
        "admin",
        "Created product",
        Some(&[
            ("product_id", product_id.as_str()),
            ("shop_id", shop.id.to_string().as_str()),
        ]),
    );

    Ok(shop_page(product.shop_id).into_response())
}

/// Display the product form pre-filled with the stored values.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(_admin, state))]
pub async fn edit_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(product_id): IdPath<ProductId>,
) -> Result<ProductFormTemplate> {
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await
        .or_not_found(format!("product {product_id}"))?;
    let shop = ShopRepository::new(state.pool())
        .get(product.shop_id)
        .await
        .or_not_found(format!("shop {}", product.shop_id))?;

    Ok(ProductFormTemplate::edit(
        product_id,
        shop,
        ProductFormValues::from(&product),
        None,
    ))
}

/// Overwrite a product's fields. The owning shop never changes.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(admin, state, form))]
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(product_id): IdPath<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let products = ProductRepository::new(state.pool());
    let product = products
        .get(product_id)
        .await
        .or_not_found(format!("product {product_id}"))?;

    let input = match form.parse() {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(product_id = %product_id, error = %e, "Rejected product form");
            let shop = ShopRepository::new(state.pool())
                .get(product.shop_id)
                .await
                .or_not_found(format!("shop {}", product.shop_id))?;
            return Ok(rejected(ProductFormTemplate::edit(
                product_id,
                shop,
                form.values(),
                Some(e.to_string()),
            )));
        }
    };

    let updated = products
        .update(product_id, &input)
        .await
        .or_not_found(format!("product {product_id}"))?;

    tracing::info!(
        product_id = %product_id,
        shop_id = %updated.shop_id,
        admin = %admin.username,
        "Product updated"
    );
    add_breadcrumb(
        "admin",
        "Updated product",
        Some(&[("product_id", product_id.to_string().as_str())]),
    );

    Ok(shop_page(updated.shop_id).into_response())
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(admin, state))]
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(product_id): IdPath<ProductId>,
) -> Result<Redirect> {
    let shop_id = ProductRepository::new(state.pool())
        .delete(product_id)
        .await
        .or_not_found(format!("product {product_id}"))?;

    tracing::info!(
        product_id = %product_id,
        shop_id = %shop_id,
        admin = %admin.username,
        "Product deleted"
    );
    add_breadcrumb(
        "admin",
        "Deleted product",
        Some(&[("product_id", product_id.to_string().as_str())]),
    );

    Ok(shop_page(shop_id))
}
