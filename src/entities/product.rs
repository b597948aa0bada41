//! Product entity - A catalog item with a price, a stock count and an optional image.
//!
//! Rust field names are English; the columns keep the names of the `productos` table.
//! The primary key is a UUID string generated by the service, never by the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    /// Random UUID v4, assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Arroz con pollo")
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    /// Unit price, finite and non-negative
    #[sea_orm(column_name = "precio")]
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Whether the product can be ordered
    #[sea_orm(column_name = "disponible")]
    pub available: bool,
    /// Image path; `None` renders as the default placeholder
    #[sea_orm(column_name = "imagen", nullable)]
    pub image: Option<String>,
}

/// Products have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
