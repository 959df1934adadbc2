// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[schema(ignore)] // O usuário vem do token
    pub username: String,

    #[schema(example = "dark")]
    pub theme: String,

    #[schema(example = "#2c3e50")]
    pub primary_color: Option<String>,

    #[schema(example = "#95a5a6")]
    pub secondary_color: Option<String>,

    pub notifications_enabled: bool,

    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPreferences {
    pub fn default_for(username: &str) -> Self {
        Self {
            username: username.to_string(),
            theme: "light".to_string(),
            primary_color: None,
            secondary_color: None,
            notifications_enabled: true,
            updated_at: None,
        }
    }
}

fn validate_theme(theme: &str) -> Result<(), ValidationError> {
    match theme {
        "light" | "dark" => Ok(()),
        _ => {
            let mut err = ValidationError::new("theme");
            err.message = Some("Tema inválido".into());
            Err(err)
        }
    }
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if (hex.len() == 6 || hex.len() == 3) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("color");
        err.message = Some("Color inválido".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[validate(custom(function = "validate_theme"))]
    #[schema(example = "dark")]
    pub theme: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    #[schema(example = "#2c3e50")]
    pub primary_color: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,

    pub notifications_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_themes_and_hex_colors_pass() {
        let ok: UpdatePreferencesRequest =
            serde_json::from_str(r##"{"theme": "dark", "primaryColor": "#1a2b3c"}"##).unwrap();
        assert!(ok.validate().is_ok());

        let bad: UpdatePreferencesRequest =
            serde_json::from_str(r#"{"theme": "neon", "secondaryColor": "red"}"#).unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("theme"));
        assert!(errors.field_errors().contains_key("secondary_color"));
    }
}
