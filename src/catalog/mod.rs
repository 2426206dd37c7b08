//! Ingredient catalog
//!
//! HTTP access to the recipe catalog and the in-memory id -> ingredient
//! mapping built from it.

pub mod client;
pub mod store;

pub use client::{CatalogClient, CatalogError, CatalogResult};
pub use store::{IngredientCatalog, SharedCatalog};
