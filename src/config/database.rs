//! Database configuration module for the catalog service.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the on-disk schema always matches the Rust
//! models without hand-written SQL. Creation is idempotent (`IF NOT EXISTS`), which is
//! what lets the service start against an existing database file.

use crate::entities::Product;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Database used when neither the config file nor `DATABASE_URL` names one.
///
/// `mode=rwc` makes `SQLite` create the file on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite3?mode=rwc";

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `productos` table from the entity definition if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;

    Ok(())
}

/// Connects to the database and makes sure the schema is in place.
///
/// This is the single entry point `main` uses to obtain the store handle that is
/// then injected into the HTTP layer.
#[instrument]
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    info!("Database connection opened. Ensuring tables are created...");
    create_tables(&db).await?;
    info!("Database tables ensured.");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProductModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that the table exists by querying it
        let rows: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_init_database() -> Result<()> {
        let db = init_database("sqlite::memory:").await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        Ok(())
    }
}
