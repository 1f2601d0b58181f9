//! Shop repository.

use sqlx::SqlitePool;

use shopkeep_core::ShopId;

use super::{ProductRepository, RepositoryError};
use crate::models::{Shop, ShopDetail, ShopInput, ShopSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: i64,
    name: String,
    description: Option<String>,
    location: Option<String>,
    image: Option<String>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: ShopId::new(row.id),
            name: row.name,
            description: row.description,
            location: row.location,
            image: row.image,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShopSummaryRow {
    id: i64,
    name: String,
    description: Option<String>,
    location: Option<String>,
    image: Option<String>,
    product_count: i64,
}

impl From<ShopSummaryRow> for ShopSummary {
    fn from(row: ShopSummaryRow) -> Self {
        Self {
            shop: Shop {
                id: ShopId::new(row.id),
                name: row.name,
                description: row.description,
                location: row.location,
                image: row.image,
            },
            product_count: row.product_count,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every shop, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Shop>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShopRow>(
            "SELECT id, name, description, location, image FROM shop ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Shop::from).collect())
    }

    /// List every shop with its product count, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_product_counts(&self) -> Result<Vec<ShopSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShopSummaryRow>(
            r"
            SELECT s.id, s.name, s.description, s.location, s.image,
                   COUNT(p.id) AS product_count
            FROM shop s
            LEFT JOIN product p ON p.shop_id = s.id
            GROUP BY s.id
            ORDER BY s.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ShopSummary::from).collect())
    }

    /// Get a shop by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this id.
    pub async fn get(&self, id: ShopId) -> Result<Shop, RepositoryError> {
        sqlx::query_as::<_, ShopRow>(
            "SELECT id, name, description, location, image FROM shop WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Shop::from)
        .ok_or(RepositoryError::NotFound)
    }

    /// Get a shop together with its products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this id.
    pub async fn get_with_products(&self, id: ShopId) -> Result<ShopDetail, RepositoryError> {
        let shop = self.get(id).await?;
        let products = ProductRepository::new(self.pool).list_for_shop(id).await?;
        Ok(ShopDetail { shop, products })
    }

    /// Create a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ShopInput) -> Result<Shop, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(
            r"
            INSERT INTO shop (name, description, location, image)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, description, location, image
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.location)
        .bind(&input.image)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite every field of a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this id.
    pub async fn update(&self, id: ShopId, input: &ShopInput) -> Result<Shop, RepositoryError> {
        sqlx::query_as::<_, ShopRow>(
            r"
            UPDATE shop
            SET name = ?, description = ?, location = ?, image = ?
            WHERE id = ?
            RETURNING id, name, description, location, image
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.location)
        .bind(&input.image)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Shop::from)
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a shop and every product it owns, in one transaction.
    ///
    /// Returns the number of products removed with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this id; nothing is
    /// deleted in that case.
    pub async fn delete(&self, id: ShopId) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let products = sqlx::query("DELETE FROM product WHERE shop_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let shops = sqlx::query("DELETE FROM shop WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if shops == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(products)
    }
}
