//! Request body interpretation for the product endpoints.
//!
//! Bodies arrive as raw bytes. Every malformed payload becomes an
//! [`Error::Validation`] and is answered with the usual `{"error": ...}` body.
//! This module only checks presence and shape; the rules on values (blank names,
//! negative prices) live in [`crate::core::product`].

use crate::{
    core::product::{NewProduct, ProductChanges},
    errors::{Error, MISSING_FIELDS_MESSAGE, Result},
};
use serde_json::{Map, Value};

const REQUIRED_FIELDS: [&str; 3] = ["nombre", "precio", "stock"];

/// Largest magnitude an `f64` can hold while still representing every integer exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Parses a create payload.
///
/// An empty, unparsable or non-object body counts as a payload with no fields.
pub fn parse_new_product(body: &[u8]) -> Result<NewProduct> {
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => return Err(Error::validation(MISSING_FIELDS_MESSAGE)),
    };

    if REQUIRED_FIELDS
        .iter()
        .any(|key| present(&fields, key).is_none())
    {
        return Err(Error::validation(MISSING_FIELDS_MESSAGE));
    }

    let mut new = NewProduct::new(
        field(&fields, "nombre", coerce_name)?,
        field(&fields, "precio", coerce_price)?,
        field(&fields, "stock", coerce_stock)?,
    );
    if let Some(value) = present(&fields, "disponible") {
        new.available = coerce_available(value)?;
    }
    if let Some(value) = fields.get("imagen") {
        new.image = coerce_image(value)?;
    }

    Ok(new)
}

/// Parses an update payload. An empty body means "no changes".
pub fn parse_product_changes(body: &[u8]) -> Result<ProductChanges> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProductChanges::default());
    }

    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => {
            return Err(Error::validation(
                "El cuerpo de la petición debe ser un objeto JSON",
            ));
        }
    };

    Ok(ProductChanges {
        name: fields.get("nombre").map(coerce_name).transpose()?,
        price: fields.get("precio").map(coerce_price).transpose()?,
        stock: fields.get("stock").map(coerce_stock).transpose()?,
        available: fields.get("disponible").map(coerce_available).transpose()?,
        image: fields.get("imagen").map(coerce_image).transpose()?,
    })
}

/// A key counts as present only when it holds a non-null value.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn field<T>(
    fields: &Map<String, Value>,
    key: &str,
    coerce: fn(&Value) -> Result<T>,
) -> Result<T> {
    present(fields, key).map_or_else(|| Err(Error::validation(MISSING_FIELDS_MESSAGE)), coerce)
}

fn coerce_name(value: &Value) -> Result<String> {
    match value {
        Value::String(name) => Ok(name.clone()),
        _ => Err(Error::validation("El campo 'nombre' debe ser texto")),
    }
}

/// Range and finiteness are checked by `core::product`.
fn coerce_price(value: &Value) -> Result<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::validation("El campo 'precio' debe ser numérico"))
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_stock(value: &Value) -> Result<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() <= MAX_EXACT_FLOAT_INT)
                .map(|n| n as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::validation("El campo 'stock' debe ser un número entero"))
}

fn coerce_available(value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::validation("El campo 'disponible' debe ser booleano"))
}

fn coerce_image(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(image) => Ok(Some(image.clone())),
        _ => Err(Error::validation("El campo 'imagen' debe ser texto")),
    }
}
