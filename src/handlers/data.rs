// src/handlers/data.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::backup::{BackupSummary, ClearPayload, ImportSummary, Snapshot},
};

// GET /api/data/export
#[utoipa::path(
    get,
    path = "/api/data/export",
    tag = "Datos",
    responses(
        (status = 200, description = "Cópia completa das coleções", body = Snapshot),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = app_state.backup_service.export(&user).await?;
    Ok(Json(snapshot))
}

// POST /api/data/import
// O corpo é lido como JSON livre para que seções ausentes sejam reportadas pelo nome.
#[utoipa::path(
    post,
    path = "/api/data/import",
    tag = "Datos",
    request_body = Snapshot,
    responses(
        (status = 200, description = "Dados substituídos", body = ImportSummary),
        (status = 400, description = "Arquivo inválido ou seções ausentes"),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(raw): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.backup_service.import(raw, &user).await?;
    Ok(Json(summary))
}

// POST /api/data/clear
#[utoipa::path(
    post,
    path = "/api/data/clear",
    tag = "Datos",
    request_body = ClearPayload,
    responses(
        (status = 200, description = "Coleções esvaziadas; devolve o ID do backup"),
        (status = 400, description = "Confirmação ausente"),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn clear_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ClearPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let backup_id = app_state
        .backup_service
        .clear_all(&payload.confirmation, &user)
        .await?;
    Ok(Json(json!({ "backupId": backup_id })))
}

// GET /api/data/backups
#[utoipa::path(
    get,
    path = "/api/data/backups",
    tag = "Datos",
    responses((status = 200, description = "Backups automáticos", body = [BackupSummary])),
    security(("api_jwt" = []))
)]
pub async fn list_backups(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let backups = app_state.backup_service.list_backups(&user).await?;
    Ok(Json(backups))
}

// POST /api/data/backups/{id}/restore
#[utoipa::path(
    post,
    path = "/api/data/backups/{id}/restore",
    tag = "Datos",
    params(("id" = i64, Path, description = "ID do backup")),
    responses(
        (status = 200, description = "Backup restaurado", body = ImportSummary),
        (status = 404, description = "Backup não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn restore_backup(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.backup_service.restore_backup(id, &user).await?;
    Ok(Json(summary))
}
