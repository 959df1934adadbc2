// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::db_utils::decimal_column;

// Limite padrão do aviso de estoque baixo (inclusive)
pub const LOW_STOCK_THRESHOLD: i64 = 5;

// Tipos exibidos nos cards do painel
pub const DASHBOARD_ITEM_TYPES: [&str; 4] = ["caja", "silla", "mesa", "carpa"];

// ---
// Item de Inventário
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[schema(example = 1718900000000_i64)]
    pub id: i64,

    #[serde(rename = "type")]
    #[schema(example = "caja")]
    pub item_type: String,

    #[schema(example = "Ataúd Roble")]
    pub name: String,

    #[schema(example = 10)]
    pub quantity: i64,

    #[schema(example = 1500.0)]
    pub price: Decimal,

    #[schema(example = "disponible")]
    pub status: String,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity <= threshold
    }
}

impl<'r> FromRow<'r, SqliteRow> for InventoryItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            item_type: row.try_get("item_type")?,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            price: decimal_column(row, "price")?,
            status: row.try_get("status")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

// ---
// Validação Customizada
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_item_type() -> String {
    "caja".to_string()
}

fn default_item_status() -> String {
    "disponible".to_string()
}

// ---
// Payload: criar/atualizar item
// ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    #[serde(rename = "type", default = "default_item_type")]
    #[validate(length(min = 1, message = "El tipo es obligatorio."))]
    #[schema(example = "caja")]
    pub item_type: String,

    #[validate(length(min = 1, message = "Por favor complete todos los campos correctamente"))]
    #[schema(example = "Ataúd Roble")]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    #[schema(example = 10)]
    pub quantity: i64,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 1500.0)]
    pub price: Decimal,

    #[serde(default = "default_item_status")]
    #[schema(example = "disponible")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn payload_defaults_follow_the_inventory_form() {
        let payload: InventoryItemPayload =
            serde_json::from_str(r#"{"name": "Silla plegable"}"#).unwrap();
        assert_eq!(payload.item_type, "caja");
        assert_eq!(payload.status, "disponible");
        assert_eq!(payload.quantity, 0);
        assert_eq!(payload.price, Decimal::ZERO);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn negative_values_are_rejected() {
        let payload: InventoryItemPayload =
            serde_json::from_str(r#"{"name": "Mesa", "quantity": -1, "price": -5}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("quantity"));
        assert!(fields.contains_key("price"));
    }
}
