//! Seed the database with a demo shop for local development.

use shopkeep_web::db::{self, ProductRepository, ShopRepository};
use shopkeep_web::models::{ProductInput, ShopInput};

/// Products stocked by the demo shop: name, sell price, buy price, stock.
const DEMO_PRODUCTS: &[(&str, f64, f64, i64)] = &[
    ("Espresso beans 1kg", 24.90, 14.50, 40),
    ("Pour-over kettle", 49.00, 27.00, 8),
    ("Paper filters (100)", 6.50, 2.10, 120),
];

/// Insert one demo shop with a handful of products.
///
/// Migrations are applied first so the command works on an empty file.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or written.
pub async fn demo_shop() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    db::migrate(&pool).await?;

    let shop = ShopRepository::new(&pool)
        .create(&ShopInput {
            name: "Corner Roastery".to_string(),
            description: Some("Small-batch coffee and brewing gear.".to_string()),
            location: Some("12 Market Street".to_string()),
            image: Some("/static/roastery.png".to_string()),
        })
        .await?;
    tracing::info!(shop_id = %shop.id, name = %shop.name, "Seeded shop");

    let products = ProductRepository::new(&pool);
    for &(name, sell_price, buy_price, nr_in_stock) in DEMO_PRODUCTS {
        let product = products
            .create(
                shop.id,
                &ProductInput {
                    name: name.to_string(),
                    sell_price,
                    buy_price,
                    nr_in_stock,
                },
            )
            .await?;
        tracing::info!(product_id = %product.id, name, "Seeded product");
    }

    tracing::info!(
        shop_id = %shop.id,
        products = DEMO_PRODUCTS.len(),
        "Seeding complete"
    );
    Ok(())
}
