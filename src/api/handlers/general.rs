//! Service-level endpoints: banner, health check and the unknown-route fallback.

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// `GET /` - names the service and lists the product endpoints.
pub async fn index() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "FoodPlease API running",
        "endpoints": ["/productos", "/productos/<id>"],
    }))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Any route not registered on the router.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Ruta no encontrada" })),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::{errors::Result, test_utils::*};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_index() -> Result<()> {
        let app = setup_test_app().await?;

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["endpoints"], json!(["/productos", "/productos/<id>"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let app = setup_test_app().await?;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route() -> Result<()> {
        let app = setup_test_app().await?;

        let (status, body) = send(&app, "GET", "/pedidos", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        Ok(())
    }
}
