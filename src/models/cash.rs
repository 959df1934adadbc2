// src/models/cash.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::db_utils::decimal_column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Ingreso,
    Egreso,
}

// ---
// Movimento de Caixa
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub id: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[schema(example = 500.0)]
    pub amount: Decimal,
    #[schema(example = "Pago parcial de venta ID: 1718900000000 - Cliente: María González")]
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for CashMovement {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            movement_type: row.try_get("movement_type")?,
            amount: decimal_column(row, "amount")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            created_by: row.try_get("created_by")?,
            sale_id: row.try_get("sale_id")?,
            payment_method: row.try_get("payment_method")?,
        })
    }
}

// ---
// Gasto
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[schema(example = 120.0)]
    pub amount: Decimal,
    #[schema(example = "Flores para capilla")]
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Expense {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            amount: decimal_column(row, "amount")?,
            description: row.try_get("description")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

// ---
// Totais do cuadre
// ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

impl CashSummary {
    pub fn from_movements<'a>(movements: impl IntoIterator<Item = &'a CashMovement>) -> Self {
        let mut summary = Self::default();
        for m in movements {
            match m.movement_type {
                MovementType::Ingreso => summary.total_income += m.amount,
                MovementType::Egreso => summary.total_expenses += m.amount,
            }
        }
        summary.balance = summary.total_income - summary.total_expenses;
        summary
    }
}

// ---
// Payloads
// ---
pub(crate) fn validate_amount(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("El monto debe ser mayor a cero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashMovementPayload {
    #[serde(rename = "type")]
    pub movement_type: MovementType,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "Por favor complete todos los campos correctamente"))]
    pub description: String,

    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    // Sem data, vale o momento do registro
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "Por favor complete todos los campos correctamente"))]
    pub description: String,
}
