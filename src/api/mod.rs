//! HTTP layer - router, shared state and server lifecycle.
//!
//! The router is built from an explicitly constructed [`AppState`] so tests can
//! drive it against an in-memory database without binding a socket.

/// Request handlers (general and product endpoints)
pub mod handlers;
/// Request body parsing and field coercion
pub mod payload;

use crate::{config::AppConfig, errors::Result};
use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};

/// Shared data available to all handlers.
/// Holds the store handle; there is no other process-wide state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all store operations, shared across handlers
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` around an open database connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Builds the complete router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::general::index))
        .route("/health", get(handlers::general::health))
        .route(
            "/productos",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/productos/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .fallback(handlers::general::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
#[instrument(skip_all)]
pub async fn serve(config: &AppConfig, database: DatabaseConnection) -> Result<()> {
    let app = build_router(AppState::new(database));

    let listener = tokio::net::TcpListener::bind(config.listen_target()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "Catalog service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Catalog service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
