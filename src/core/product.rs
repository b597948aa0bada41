//! Product business logic - Handles all catalog operations on products.
//!
//! This module provides functions for creating, listing, retrieving, updating and
//! deleting products. It owns the data-model rules (a non-empty name and a finite,
//! non-negative price) so every caller gets the same guarantees, not only the HTTP
//! layer.
//!
//! Every mutation runs in its own database transaction: the existence check and the
//! write share one transaction, and any store failure rolls it back before the error
//! is returned. Reads go straight to the connection.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{DatabaseTransaction, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name; must not be blank
    pub name: String,
    /// Unit price; must be finite and non-negative
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Defaults to `true` when the caller leaves it out
    pub available: bool,
    /// Optional image path; `None` renders as the placeholder
    pub image: Option<String>,
}

impl NewProduct {
    /// A product with the required fields and default `available`/`image`.
    #[must_use]
    pub const fn new(name: String, price: f64, stock: i64) -> Self {
        Self {
            name,
            price,
            stock,
            available: true,
            image: None,
        }
    }
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    /// New display name
    pub name: Option<String>,
    /// New unit price
    pub price: Option<f64>,
    /// New stock count
    pub stock: Option<i64>,
    /// New availability flag
    pub available: Option<bool>,
    /// Doubly optional: `Some(None)` clears the stored image
    pub image: Option<Option<String>>,
}

impl ProductChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.available.is_none()
            && self.image.is_none()
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    fn apply_to(self, active: &mut product::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(price) = self.price {
            active.price = Set(price);
        }
        if let Some(stock) = self.stock {
            active.stock = Set(stock);
        }
        if let Some(available) = self.available {
            active.available = Set(available);
        }
        if let Some(image) = self.image {
            active.image = Set(image);
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("El campo 'nombre' no puede estar vacío"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(Error::validation("El campo 'precio' debe ser numérico"));
    }
    if price < 0.0 {
        return Err(Error::validation("El campo 'precio' no puede ser negativo"));
    }
    Ok(())
}

/// Rolls back, logging (not returning) a failed rollback so the caller's error wins.
async fn abandon(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        warn!(error = %err, "Rollback failed");
    }
}

/// Commits on success, rolls back on failure, and hands back the outcome.
async fn finish<T>(
    txn: DatabaseTransaction,
    outcome: std::result::Result<T, DbErr>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "Store operation failed, rolling back");
            abandon(txn).await;
            Err(err.into())
        }
    }
}

/// Finds a product inside `txn` or rolls back and reports it missing.
async fn find_in_txn(
    txn: DatabaseTransaction,
    id: &str,
) -> Result<(DatabaseTransaction, product::Model)> {
    match Product::find_by_id(id.to_owned()).one(&txn).await {
        Ok(Some(model)) => Ok((txn, model)),
        Ok(None) => {
            abandon(txn).await;
            Err(Error::ProductNotFound { id: id.to_owned() })
        }
        Err(err) => {
            abandon(txn).await;
            Err(err.into())
        }
    }
}

/// Creates a new product under a freshly generated UUID.
///
/// The name must not be blank and the price must be finite and non-negative. The
/// insert runs in its own transaction, so a failed write leaves nothing behind.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert or commit fails
#[instrument(skip(db))]
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    validate_name(&new.name)?;
    validate_price(new.price)?;

    let product = product::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(new.name),
        price: Set(new.price),
        stock: Set(new.stock),
        available: Set(new.available),
        image: Set(new.image),
    };

    let txn = db.begin().await?;
    let outcome = product.insert(&txn).await;
    let created = finish(txn, outcome).await?;

    info!(id = %created.id, name = %created.name, "Created product");
    Ok(created)
}

/// Retrieves every stored product.
///
/// No filtering, pagination or ordering is applied; an empty store yields an empty
/// vector.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    let products = Product::find().all(db).await?;
    debug!(count = products.len(), "Listed products");
    Ok(products)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns `Error::ProductNotFound` for an unknown id, `Error::Database` if the query
/// fails.
#[instrument(skip(db))]
pub async fn get_product(db: &DatabaseConnection, id: &str) -> Result<product::Model> {
    Product::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound { id: id.to_owned() })
}

/// Applies a partial update and returns the stored result.
///
/// Only the fields set in `changes` are written. An empty change set is not an error;
/// the current record is returned unchanged.
///
/// # Errors
/// Returns an error if:
/// - No product has this id
/// - A new name is blank or a new price is negative or not finite
/// - The database update or commit fails (the transaction is rolled back)
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    changes: ProductChanges,
) -> Result<product::Model> {
    update_product_with(db, id, move || Ok(changes)).await
}

/// Like [`update_product`], but builds the change set only once the product is known
/// to exist.
///
/// The lookup and the write share one transaction. `changes` runs after the lookup,
/// so an unknown id is reported as `Error::ProductNotFound` even when the change set
/// itself would be rejected.
///
/// # Errors
/// Returns `Error::ProductNotFound` for an unknown id, whatever `changes` returns,
/// `Error::Validation` for a blank name or an invalid price, and `Error::Database` if
/// the update or commit fails.
#[instrument(skip(db, changes))]
pub async fn update_product_with<F>(
    db: &DatabaseConnection,
    id: &str,
    changes: F,
) -> Result<product::Model>
where
    F: FnOnce() -> Result<ProductChanges>,
{
    let txn = db.begin().await?;
    let (txn, existing) = find_in_txn(txn, id).await?;

    let changes = match changes().and_then(|changes| changes.validate().map(|()| changes)) {
        Ok(changes) => changes,
        Err(err) => {
            abandon(txn).await;
            return Err(err);
        }
    };

    if changes.is_empty() {
        txn.commit().await?;
        debug!(%id, "Update carried no changes");
        return Ok(existing);
    }

    let mut active: product::ActiveModel = existing.into();
    changes.apply_to(&mut active);

    let outcome = active.update(&txn).await;
    let updated = finish(txn, outcome).await?;

    info!(%id, "Updated product");
    Ok(updated)
}

/// Permanently removes a product. There is no soft delete.
///
/// # Errors
/// Returns `Error::ProductNotFound` for an unknown id, `Error::Database` if the delete
/// or commit fails (the transaction is rolled back).
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;
    let (txn, existing) = find_in_txn(txn, id).await?;

    let outcome = Product::delete_by_id(existing.id).exec(&txn).await;
    finish(txn, outcome).await?;

    info!(%id, "Deleted product");
    Ok(())
}
