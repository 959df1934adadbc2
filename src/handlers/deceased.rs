// src/handlers/deceased.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::deceased::{DeceasedPayload, DeceasedRecord},
};

// GET /api/deceased
#[utoipa::path(
    get,
    path = "/api/deceased",
    tag = "Fallecidos",
    responses(
        (status = 200, description = "Registros de falecidos", body = [DeceasedRecord]),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_deceased(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state.deceased_service.list(&user).await?;
    Ok(Json(records))
}

// GET /api/deceased/{id}
#[utoipa::path(
    get,
    path = "/api/deceased/{id}",
    tag = "Fallecidos",
    params(("id" = i64, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro", body = DeceasedRecord),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_deceased(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.deceased_service.get(id, &user).await?;
    Ok(Json(record))
}

// POST /api/deceased
#[utoipa::path(
    post,
    path = "/api/deceased",
    tag = "Fallecidos",
    request_body = DeceasedPayload,
    responses(
        (status = 201, description = "Registro criado", body = DeceasedRecord),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_deceased(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<DeceasedPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.deceased_service.create(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// PUT /api/deceased/{id}
#[utoipa::path(
    put,
    path = "/api/deceased/{id}",
    tag = "Fallecidos",
    params(("id" = i64, Path, description = "ID do registro")),
    request_body = DeceasedPayload,
    responses(
        (status = 200, description = "Registro atualizado", body = DeceasedRecord),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_deceased(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<DeceasedPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.deceased_service.update(id, payload, &user).await?;
    Ok(Json(record))
}

// DELETE /api/deceased/{id}
#[utoipa::path(
    delete,
    path = "/api/deceased/{id}",
    tag = "Fallecidos",
    params(("id" = i64, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_deceased(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.deceased_service.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
