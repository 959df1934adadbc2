// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::notice::Notice;

// Mensagem genérica devolvida ao cliente quando o erro é interno.
pub const GENERIC_ERROR_MESSAGE: &str = "Ha ocurrido un error en el servidor";

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Datos inválidos")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Sesión no válida")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    // Uma entrada por item sem estoque; nada foi gravado.
    #[error("Stock insuficiente")]
    InsufficientStock(Vec<Notice>),

    #[error("Faltan secciones requeridas: {}", .0.join(", "))]
    MissingSections(Vec<String>),

    #[error("Operación cancelada")]
    ConfirmationRequired,

    #[error("Registro duplicado: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro pronto para a API REST: status HTTP + corpo JSON.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    /// true para os erros cuja causa real só deve aparecer no log.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::SerializationError(_)
                | AppError::InternalServerError(_)
                | AppError::BcryptError(_)
                | AppError::JwtError(_)
        )
    }

    /// Mensagem exibida ao usuário (o "showNotification" do front).
    pub fn user_message(&self) -> String {
        match self {
            AppError::InsufficientStock(notices) => notices
                .iter()
                .map(|n| n.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            e if e.is_internal() => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            e => e.to_string(),
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let status = match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::InsufficientStock(_)
            | AppError::MissingSections(_)
            | AppError::ConfirmationRequired => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let details = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::InsufficientStock(notices) => Some(json!(notices)),
            AppError::MissingSections(sections) => Some(json!(sections)),
            _ => None,
        };

        ApiError {
            status,
            error: self.user_message(),
            details,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error().into_response()
    }
}
