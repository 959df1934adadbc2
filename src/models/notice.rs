// src/models/notice.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Nível das notificações mostradas ao usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    #[schema(example = "Stock bajo para Ataúd Roble: 4 unidades")]
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }
}

/// Resultado de uma operação acompanhado das notificações geradas.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WithNotices<T> {
    pub data: T,
    pub notices: Vec<Notice>,
}
