//! List shops with their product counts.

use shopkeep_web::db::ShopRepository;

/// Print every shop as `id  products  name`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or queried.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let shops = ShopRepository::new(&pool).list_with_product_counts().await?;

    #[allow(clippy::print_stdout)]
    {
        if shops.is_empty() {
            println!("No shops.");
        }
        for summary in &shops {
            println!(
                "{:>5}  {:>4} products  {}",
                summary.shop.id, summary.product_count, summary.shop.name
            );
        }
    }

    Ok(())
}
