//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database)
//!
//! # Public
//! GET  /                                - Shop listing
//! GET  /shop/{id}                       - Shop detail with products
//!
//! # Auth
//! GET  /login                           - Login page
//! POST /login                           - Login action
//! GET  /logout                          - Logout action
//!
//! # Admin (requires auth)
//! GET  /admin                           - Shop management listing
//! GET  /admin/add                       - New shop form
//! POST /admin/add                       - Create shop
//! GET  /admin/edit/{id}                 - Edit shop form
//! POST /admin/edit/{id}                 - Update shop
//! GET  /admin/delete/{id}               - Delete shop and its products
//! GET  /admin/shop/{id}/add_product     - New product form
//! POST /admin/shop/{id}/add_product     - Create product
//! GET  /admin/product/edit/{id}         - Edit product form
//! POST /admin/product/edit/{id}         - Update product
//! GET  /admin/product/delete/{id}       - Delete product
//! ```

pub mod admin;
pub mod auth;
pub mod forms;
pub mod health;
pub mod params;
pub mod products;
pub mod shops;

pub use params::IdPath;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the health check routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/add", get(admin::new_shop).post(admin::create_shop))
        .route("/edit/{id}", get(admin::edit_shop).post(admin::update_shop))
        .route("/delete/{id}", get(admin::delete_shop))
        .route(
            "/shop/{id}/add_product",
            get(products::new_product).post(products::create_product),
        )
        .route(
            "/product/edit/{id}",
            get(products::edit_product).post(products::update_product),
        )
        .route("/product/delete/{id}", get(products::delete_product))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(shops::index))
        .route("/shop/{id}", get(shops::show))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Management
        .nest("/admin", admin_routes())
}
