//! Nutrient Aggregation Engine Library
//!
//! Unit conversion, recipe per-100g aggregation, daily macro totals and
//! target progress, plus the catalog client and tool server around them.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
