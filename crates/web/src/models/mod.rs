//! Domain models.

pub mod product;
pub mod session;
pub mod shop;

pub use product::{Product, ProductInput};
pub use session::{CurrentAdmin, keys as session_keys};
pub use shop::{Shop, ShopDetail, ShopInput, ShopSummary};
