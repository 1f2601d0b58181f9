//! Public shop pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use shopkeep_core::ShopId;

use crate::db::ShopRepository;
use crate::error::{RepositoryResultExt, Result};
use crate::filters;
use crate::middleware::OptionalAdmin;
use crate::models::{Product, Shop};
use crate::routes::IdPath;
use crate::state::AppState;

/// Shop listing template.
#[derive(Template, WebTemplate)]
#[template(path = "shops/index.html")]
pub struct ShopIndexTemplate {
    pub is_admin: bool,
    pub shops: Vec<Shop>,
}

/// Shop detail template.
#[derive(Template, WebTemplate)]
#[template(path = "shops/show.html")]
pub struct ShopShowTemplate {
    pub is_admin: bool,
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// List every shop.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    admin: OptionalAdmin,
) -> Result<ShopIndexTemplate> {
    let shops = ShopRepository::new(state.pool()).list_all().await?;

    Ok(ShopIndexTemplate {
        is_admin: admin.is_admin(),
        shops,
    })
}

/// Show one shop with its products.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
#[instrument(skip(state, admin))]
pub async fn show(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    IdPath(shop_id): IdPath<ShopId>,
) -> Result<ShopShowTemplate> {
    let detail = ShopRepository::new(state.pool())
        .get_with_products(shop_id)
        .await
        .or_not_found(format!("shop {shop_id}"))?;

    Ok(ShopShowTemplate {
        is_admin: admin.is_admin(),
        shop: detail.shop,
        products: detail.products,
    })
}
