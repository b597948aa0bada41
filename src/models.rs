//! Client-facing representation of a product.
//!
//! Stored rows are never serialized directly: the JSON view adds the constant
//! category and substitutes the placeholder image at read time.

use crate::entities::product;
use serde::{Deserialize, Serialize};

/// Category reported for every product. It is neither stored nor settable.
pub const DEFAULT_CATEGORY: &str = "Plato de fondo";

/// Image reported when a product has none stored (or an empty one).
pub const DEFAULT_IMAGE: &str = "assets/images/default_plato.png";

/// JSON shape of a product: `{id, nombre, categoria, precio, stock, disponible, imagen}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    /// Product UUID
    pub id: String,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Always [`DEFAULT_CATEGORY`]
    #[serde(rename = "categoria")]
    pub category: String,
    /// Unit price
    #[serde(rename = "precio")]
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Whether the product can be ordered
    #[serde(rename = "disponible")]
    pub available: bool,
    /// Stored image path, or [`DEFAULT_IMAGE`] when none is stored
    #[serde(rename = "imagen")]
    pub image: String,
}

impl From<product::Model> for ProductView {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: DEFAULT_CATEGORY.to_string(),
            price: model.price,
            stock: model.stock,
            available: model.available,
            image: model
                .image
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn model(image: Option<&str>) -> product::Model {
        product::Model {
            id: "6f1c8a52-0c1e-4a39-9d55-0f7f1b3d2a11".to_string(),
            name: "Arroz".to_string(),
            price: 5.5,
            stock: 10,
            available: true,
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        assert_eq!(ProductView::from(model(None)).image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_empty_image_uses_placeholder() {
        assert_eq!(ProductView::from(model(Some(""))).image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_stored_image_is_kept() {
        let view = ProductView::from(model(Some("assets/images/arroz.png")));
        assert_eq!(view.image, "assets/images/arroz.png");
    }

    #[test]
    fn test_json_shape_and_field_order() {
        let json = serde_json::to_string(&ProductView::from(model(None))).unwrap();
        assert_eq!(
            json,
            r#"{"id":"6f1c8a52-0c1e-4a39-9d55-0f7f1b3d2a11","nombre":"Arroz","categoria":"Plato de fondo","precio":5.5,"stock":10,"disponible":true,"imagen":"assets/images/default_plato.png"}"#
        );
    }
}
