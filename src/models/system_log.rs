// src/models/system_log.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Quantidade máxima de entradas mantidas no log
pub const MAX_SYSTEM_LOGS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: i64,
    #[serde(rename = "type")]
    #[schema(example = "data_export")]
    pub log_type: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub user: String,
}

// Tipos de eventos registrados pelo sistema
pub mod kinds {
    pub const DATA_EXPORT: &str = "data_export";
    pub const DATA_IMPORT: &str = "data_import";
    pub const DATA_CLEAR: &str = "data_clear";
    pub const LOW_INVENTORY: &str = "low_inventory";
    pub const SYSTEM_UPDATE: &str = "system_update";
    pub const SYSTEM_UPDATE_ERROR: &str = "system_update_error";
}

/// Resultado da manutenção diária.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub purged_sales: u64,
    pub low_stock_items: usize,
}
