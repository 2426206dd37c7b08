//! Engine Tools module
//!
//! Tool implementations behind the MCP server. Each wraps the pure
//! nutrition engine and returns serializable responses.

pub mod catalog;
pub mod days;
pub mod meals;
pub mod recipes;
pub mod status;
