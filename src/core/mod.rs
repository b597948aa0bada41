//! Core business logic - framework-agnostic catalog operations.

/// Create, list, fetch, update and delete products
pub mod product;
