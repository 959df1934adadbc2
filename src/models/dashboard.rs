// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::report::ActivityEntry;

// Número de itens cadastrados por tipo (os cards do topo)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[schema(example = "caja")]
    pub item_type: String,
    pub item_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub sales_today: usize,
    pub income_today: Decimal,
    // Estatísticas de inventário só aparecem para o admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_by_type: Option<Vec<TypeCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_units: Option<i64>,
    pub recent_activity: Vec<ActivityEntry>,
}
