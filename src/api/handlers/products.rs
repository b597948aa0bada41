//! Product endpoints under `/productos`.
//!
//! Each handler is a thin adapter: parse the body, call into [`crate::core::product`],
//! render the result as a [`ProductView`]. Errors propagate with `?` and are turned
//! into `{"error": ...}` responses by [`crate::errors::Error`].

use crate::{
    api::{AppState, payload},
    core::product,
    errors::Result,
    models::ProductView,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

/// `POST /productos`
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ProductView>)> {
    let new = payload::parse_new_product(&body)?;
    let created = product::create_product(&state.database, new).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /productos`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let products = product::list_products(&state.database).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// `GET /productos/:id`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let found = product::get_product(&state.database, &id).await?;
    Ok(Json(found.into()))
}

/// `PUT /productos/:id`
///
/// The body is parsed only after the product is found, so an unknown product is
/// always a 404.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ProductView>> {
    let updated = product::update_product_with(&state.database, &id, || {
        payload::parse_product_changes(&body)
    })
    .await?;
    Ok(Json(updated.into()))
}

/// `DELETE /productos/:id`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    product::delete_product(&state.database, &id).await?;
    Ok(Json(json!({ "mensaje": "Producto eliminado correctamente" })))
}
