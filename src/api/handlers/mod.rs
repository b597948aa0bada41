//! Request handlers organized by resource.

/// Banner, health check and fallback
pub mod general;

/// Product CRUD endpoints
pub mod products;
