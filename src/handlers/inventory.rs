// src/handlers/inventory.rs

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
    models::inventory::{InventoryItem, InventoryItemPayload},
};

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventario",
    responses(
        (status = 200, description = "Todos os itens do inventário", body = [InventoryItem]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_items(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.inventory_service.list_items().await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/inventory/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventario",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.get_item(id).await?;
    Ok(Json(item))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventario",
    request_body = InventoryItemPayload,
    responses(
        (status = 201, description = "Item criado", body = InventoryItem),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.create_item(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventario",
    params(("id" = i64, Path, description = "ID do item")),
    request_body = InventoryItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state.inventory_service.update_item(id, payload, &user).await?;
    Ok(Json(item))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventario",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.inventory_service.delete_item(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
