// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::User};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião)
/// Os papéis são fixos, então a checagem não consulta o banco.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Usuário colocado pelo auth_guard
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        // B. Verifica o papel
        let required_perm = T::slug();
        if !user.role.has_permission(required_perm) {
            tracing::warn!("🚫 {} sem a permissão '{}'", user.username, required_perm);
            return Err(AppError::Forbidden("No tiene acceso a esta sección".into()));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermAdmin;
impl PermissionDef for PermAdmin {
    fn slug() -> &'static str { "admin" }
}

pub struct PermDashboardView;
impl PermissionDef for PermDashboardView {
    fn slug() -> &'static str { "inicio:view" }
}

pub struct PermReportsView;
impl PermissionDef for PermReportsView {
    fn slug() -> &'static str { "reportes:view" }
}

pub struct PermOptionsView;
impl PermissionDef for PermOptionsView {
    fn slug() -> &'static str { "opciones:view" }
}
