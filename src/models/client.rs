// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- CLIENTE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,

    #[schema(example = "María González")]
    pub name: String,

    // Cédula / documento de identidade
    #[schema(example = "001-1234567-8")]
    pub document_id: String,

    #[schema(example = "809-555-0101")]
    pub phone: String,

    #[schema(example = "Calle Principal 12")]
    pub address: String,

    #[serde(default)]
    pub email: Option<String>,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub name: String,

    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub document_id: String,

    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Por favor complete todos los campos requeridos"))]
    pub address: String,

    // O formulário manda "" quando o e-mail não é informado
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email(message = "El correo electrónico es inválido."))]
    pub email: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_treated_as_missing() {
        let payload: ClientPayload = serde_json::from_str(
            r#"{"name": "Ana", "documentId": "1", "phone": "2", "address": "3", "email": "  "}"#,
        )
        .unwrap();
        assert_eq!(payload.email, None);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn required_fields_are_enforced() {
        let payload: ClientPayload = serde_json::from_str(
            r#"{"name": "", "documentId": "1", "phone": "", "address": "3"}"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("phone"));
    }
}
