//! Shop domain types.

use serde::{Deserialize, Serialize};

use shopkeep_core::ShopId;

use super::product::Product;

/// A shop as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

/// A shop together with the products it owns, ordered by product id.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopDetail {
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// A shop with the number of products it owns, for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopSummary {
    pub shop: Shop,
    pub product_count: i64,
}

/// Field values for creating or editing a shop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShopInput {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}
