// src/models/deceased.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Registro de fallecido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeceasedRecord {
    pub id: i64,
    #[schema(example = "José Pérez")]
    pub name: String,
    pub document_id: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[schema(example = "2025-03-14")]
    pub date_of_death: NaiveDate,
    #[serde(default)]
    pub cause_of_death: String,
    #[serde(default)]
    pub death_location: Option<String>,
    #[serde(default)]
    pub family_contact: Option<String>,
    #[serde(default)]
    #[schema(example = "velatorio")]
    pub service_type: String,
    #[serde(default)]
    #[schema(example = "en_proceso")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

fn default_status() -> String {
    "en_proceso".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeceasedPayload {
    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub name: String,

    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub document_id: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 150, message = "Edad inválida"))]
    pub age: Option<i64>,

    pub date_of_death: NaiveDate,

    #[serde(default)]
    pub cause_of_death: String,
    #[serde(default)]
    pub death_location: Option<String>,
    #[serde(default)]
    pub family_contact: Option<String>,
    #[serde(default)]
    pub service_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_of_death_is_required() {
        let missing = serde_json::from_str::<DeceasedPayload>(
            r#"{"name": "José", "documentId": "1"}"#,
        );
        assert!(missing.is_err());

        let ok: DeceasedPayload = serde_json::from_str(
            r#"{"name": "José", "documentId": "1", "dateOfDeath": "2025-03-14", "age": 80}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.status, "en_proceso");
    }
}
