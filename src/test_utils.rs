//! Shared test utilities for the catalog service.
//!
//! This module provides helpers for setting up test databases, creating products
//! with sensible defaults, and driving the HTTP router without a socket.

use crate::{
    api::{AppState, build_router},
    core::product::{self, NewProduct},
    entities,
    errors::Result,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{ConnectOptions, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool is capped at one connection: every `:memory:` connection is a separate
/// database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * price: 10.0
/// * stock: 5
/// * available: true, no image
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, NewProduct::new(name.to_string(), 10.0, 5)).await
}

/// Sets up a database holding one product.
/// Returns (db, product) for product-related tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}

/// Builds the full router over a fresh in-memory database.
pub async fn setup_test_app() -> Result<Router> {
    let db = setup_test_db().await?;
    Ok(build_router(AppState::new(db)))
}

/// Sends one request through the router and returns the status and JSON body.
///
/// A `None` body sends an empty request body. A response with an empty body
/// yields `Value::Null`.
#[allow(clippy::unwrap_used)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
