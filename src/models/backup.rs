// src/models/backup.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{
    cash::{CashMovement, Expense},
    client::Client,
    deceased::DeceasedRecord,
    inventory::InventoryItem,
    sale::Sale,
    system_log::SystemLog,
};

pub const SYSTEM_VERSION: &str = "1.0";

// Seções que todo arquivo de importação precisa ter
pub const REQUIRED_SECTIONS: [&str; 4] = ["inventory", "sales", "clients", "cashMovements"];

// Texto que o usuário precisa digitar para apagar tudo
pub const CLEAR_CONFIRMATION: &str = "CONFIRMAR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub export_date: DateTime<Utc>,
    #[schema(example = "1.0")]
    pub system_version: String,
    pub exported_by: String,
}

/// Cópia completa das coleções. É o formato do arquivo de exportação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub inventory: Vec<InventoryItem>,
    pub sales: Vec<Sale>,
    pub clients: Vec<Client>,
    pub cash_movements: Vec<CashMovement>,
    #[serde(default)]
    pub expenses: Option<Vec<Expense>>,
    #[serde(default)]
    pub deceased: Option<Vec<DeceasedRecord>>,
    #[serde(default)]
    pub system_logs: Option<Vec<SystemLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

impl Snapshot {
    /// Lista as seções obrigatórias ausentes num JSON ainda não tipado.
    pub fn missing_sections(raw: &Value) -> Vec<String> {
        REQUIRED_SECTIONS
            .iter()
            .filter(|section| raw.get(**section).is_none_or(|v| v.is_null()))
            .map(|section| section.to_string())
            .collect()
    }

    /// Maior ID presente, para reposicionar o gerador após importar.
    pub fn max_id(&self) -> i64 {
        let ids = self
            .inventory
            .iter()
            .map(|i| i.id)
            .chain(self.sales.iter().map(|s| s.id))
            .chain(self.clients.iter().map(|c| c.id))
            .chain(self.cash_movements.iter().map(|m| m.id))
            .chain(self.expenses.iter().flatten().map(|e| e.id))
            .chain(self.deceased.iter().flatten().map(|d| d.id))
            .chain(self.system_logs.iter().flatten().map(|l| l.id));
        ids.max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BackupKind {
    PreImport,
    PreClear,
}

// Cópia de segurança guardada antes de importar ou limpar
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub id: i64,
    pub kind: BackupKind,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Backup {
    pub id: i64,
    pub kind: BackupKind,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub payload: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClearPayload {
    #[schema(example = "CONFIRMAR")]
    pub confirmation: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub backup_id: i64,
    pub inventory: usize,
    pub sales: usize,
    pub clients: usize,
    pub cash_movements: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_are_reported_by_name() {
        let raw = json!({"inventory": [], "clients": [], "sales": null});
        assert_eq!(
            Snapshot::missing_sections(&raw),
            vec!["sales".to_string(), "cashMovements".to_string()]
        );
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let raw = json!({"inventory": [], "sales": [], "clients": [], "cashMovements": []});
        assert!(Snapshot::missing_sections(&raw).is_empty());
        let snapshot: Snapshot = serde_json::from_value(raw).unwrap();
        assert!(snapshot.expenses.is_none());
        assert_eq!(snapshot.max_id(), 0);
    }
}
