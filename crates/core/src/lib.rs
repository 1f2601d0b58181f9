//! Shopkeep Core - Shared types library.
//!
//! This crate provides the types shared by the Shopkeep components:
//! - `web` - Public shop listing and the admin panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Database encoding for the ID types is available behind the
//! `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and stock/price value parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
