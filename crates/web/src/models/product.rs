//! Product domain types.

use serde::{Deserialize, Serialize};

use shopkeep_core::{ProductId, ShopId};

/// An inventory item. `shop_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub shop_id: ShopId,
    pub name: String,
    pub sell_price: f64,
    pub buy_price: f64,
    pub nr_in_stock: i64,
}

/// Field values for creating or editing a product.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductInput {
    pub name: String,
    pub sell_price: f64,
    pub buy_price: f64,
    pub nr_in_stock: i64,
}
