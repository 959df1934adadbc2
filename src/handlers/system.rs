// src/handlers/system.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermOptionsView, RequirePermission},
    },
    models::system_log::{MaintenanceReport, SystemLog},
};

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Sistema",
    responses((status = 200, description = "Serviço no ar"))
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// GET /api/system/logs
#[utoipa::path(
    get,
    path = "/api/system/logs",
    tag = "Sistema",
    responses(
        (status = 200, description = "Log do sistema, mais recentes primeiro", body = [SystemLog]),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermOptionsView>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = app_state.system_log_service.list().await?;
    Ok(Json(logs))
}

// POST /api/system/maintenance
#[utoipa::path(
    post,
    path = "/api/system/maintenance",
    tag = "Sistema",
    responses(
        (status = 200, description = "Manutenção executada", body = MaintenanceReport),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn run_maintenance(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state.maintenance_service.run_now(&user).await?;
    Ok(Json(report))
}
