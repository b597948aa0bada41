//! Unified error type for the catalog service.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer renders
//! an [`Error`] directly through its [`IntoResponse`] impl, so handlers can use `?`
//! all the way down to the database call.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Message returned when a create payload lacks any of the required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Faltan datos obligatorios (nombre, precio, stock)";

/// Message returned for unknown product ids.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Producto no encontrado";

/// Every failure the service can report.
///
/// Only the first three variants are expected while serving requests; `Config` and
/// `Io` come from startup (reading settings, binding the listener).
#[derive(Debug, Error)]
pub enum Error {
    /// The request payload is missing fields or carries values of the wrong shape.
    #[error("{message}")]
    Validation {
        /// Client-facing explanation, returned verbatim in the `error` field
        message: String,
    },

    /// No product exists with the requested id.
    #[error("Producto no encontrado")]
    ProductNotFound {
        /// The id that was looked up
        id: String,
    },

    /// Any failure reported by the store. The text is forwarded to the caller as-is.
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),

    /// Settings could not be read, parsed or applied.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong and where
        message: String,
    },

    /// Socket or filesystem failure, e.g. the listen address is taken.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to when it reaches a client.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::ProductNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
