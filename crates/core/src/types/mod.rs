//! Core types for Shopkeep.

pub mod id;
pub mod quantity;

pub use id::*;
pub use quantity::{QuantityError, parse_price, parse_stock};
