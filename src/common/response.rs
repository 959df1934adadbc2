// src/common/response.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::common::error::AppError;

/// Envelope uniforme do endpoint de ações: {success, data, message, timestamp}.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ActionResponse {
    pub fn ok(data: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<AppError> for ActionResponse {
    fn from(err: AppError) -> Self {
        let message = match &err {
            AppError::ValidationError(_) => "Datos inválidos".to_string(),
            e => e.user_message(),
        };
        let mut response = ActionResponse::fail(message);
        // Os avisos por item continuam visíveis para o front
        if let AppError::InsufficientStock(notices) = &err {
            response.data = serde_json::to_value(notices).ok();
        }
        response
    }
}
