// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

// Seções do sistema (os itens do menu lateral)
pub const SECTIONS: [&str; 10] = [
    "inicio", "inventario", "cuadre", "reportes", "gastos",
    "clientes", "ventas", "seguros", "fallecidos", "opciones",
];

const CAJERO_VIEW: [&str; 3] = ["inicio", "ventas", "cuadre"];
const CAJERO_EDIT: [&str; 2] = ["ventas", "cuadre"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cajero,
}

impl Role {
    pub fn can_view(&self, section: &str) -> bool {
        match self {
            Role::Admin => SECTIONS.contains(&section),
            Role::Cajero => CAJERO_VIEW.contains(&section),
        }
    }

    pub fn can_edit(&self, section: &str) -> bool {
        match self {
            Role::Admin => SECTIONS.contains(&section),
            Role::Cajero => CAJERO_EDIT.contains(&section),
        }
    }

    /// Verifica um slug de permissão: "admin", "<seção>:view" ou "<seção>:edit".
    pub fn has_permission(&self, slug: &str) -> bool {
        match slug.split_once(':') {
            Some((section, "view")) => self.can_view(section),
            Some((section, "edit")) => self.can_edit(section),
            None if slug == "admin" => *self == Role::Admin,
            _ => false,
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[schema(example = "cajero1")]
    pub username: String,
    #[schema(example = "Cajero 1")]
    pub name: String,
    pub role: Role,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Caixas só enxergam os próprios registros.
    pub fn sees_only_own_records(&self) -> bool {
        self.role == Role::Cajero
    }

    /// Falha com Forbidden(`message`) se o papel não tiver a permissão.
    pub fn require(&self, slug: &str, message: &str) -> Result<(), AppError> {
        if self.role.has_permission(slug) {
            Ok(())
        } else {
            Err(AppError::Forbidden(message.to_string()))
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "Ingrese usuario y contraseña"))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 1, message = "Ingrese usuario y contraseña"))]
    #[schema(example = "admin123")]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cashier_is_limited_to_sales_and_cuadre() {
        assert!(Role::Cajero.can_view("inicio"));
        assert!(Role::Cajero.can_edit("ventas"));
        assert!(Role::Cajero.can_edit("cuadre"));
        assert!(!Role::Cajero.can_edit("inicio"));
        assert!(!Role::Cajero.can_view("inventario"));
        assert!(!Role::Cajero.has_permission("reportes:view"));
        assert!(!Role::Cajero.has_permission("admin"));
    }

    #[test]
    fn admin_has_every_section() {
        for section in SECTIONS {
            assert!(Role::Admin.has_permission(&format!("{section}:edit")));
        }
        assert!(Role::Admin.has_permission("admin"));
        assert!(!Role::Admin.has_permission("nomina:view"));
    }
}
