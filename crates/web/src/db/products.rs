//! Product repository.

use sqlx::SqlitePool;

use shopkeep_core::{ProductId, ShopId};

use super::RepositoryError;
use crate::models::{Product, ProductInput};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    shop_id: i64,
    name: String,
    sell_price: f64,
    buy_price: f64,
    nr_in_stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            shop_id: ShopId::new(row.shop_id),
            name: row.name,
            sell_price: row.sell_price,
            buy_price: row.buy_price,
            nr_in_stock: row.nr_in_stock,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, shop_id, name, sell_price, buy_price, nr_in_stock
            FROM product
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Product::from)
        .ok_or(RepositoryError::NotFound)
    }

    /// List the products of one shop, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, shop_id, name, sell_price, buy_price, nr_in_stock
            FROM product
            WHERE shop_id = ?
            ORDER BY id
            ",
        )
        .bind(shop_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Create a product under a shop.
    ///
    /// The shop is looked up inside the same transaction before the insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop does not exist; no
    /// product is written in that case.
    pub async fn create(
        &self,
        shop_id: ShopId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let shop: Option<(i64,)> = sqlx::query_as("SELECT id FROM shop WHERE id = ?")
            .bind(shop_id)
            .fetch_optional(&mut *tx)
            .await?;
        if shop.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO product (name, sell_price, buy_price, nr_in_stock, shop_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, shop_id, name, sell_price, buy_price, nr_in_stock
            ",
        )
        .bind(&input.name)
        .bind(input.sell_price)
        .bind(input.buy_price)
        .bind(input.nr_in_stock)
        .bind(shop_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Overwrite the editable fields of a product. The owning shop is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE product
            SET name = ?, sell_price = ?, buy_price = ?, nr_in_stock = ?
            WHERE id = ?
            RETURNING id, shop_id, name, sell_price, buy_price, nr_in_stock
            ",
        )
        .bind(&input.name)
        .bind(input.sell_price)
        .bind(input.buy_price)
        .bind(input.nr_in_stock)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Product::from)
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product, returning the shop it belonged to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn delete(&self, id: ProductId) -> Result<ShopId, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("DELETE FROM product WHERE id = ? RETURNING shop_id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|(shop_id,)| ShopId::new(shop_id))
            .ok_or(RepositoryError::NotFound)
    }
}
