// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        notice::WithNotices,
        sale::{
            AddCartItemPayload, PaymentPayload, PaymentReceipt, RegisterSalePayload, Sale,
            SaleDraft, SaleListQuery, UpdateSaleStatusPayload,
        },
    },
};

// =============================================================================
//  CARRINHO
// =============================================================================

// POST /api/cart/items
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Ventas",
    request_body = AddCartItemPayload,
    responses(
        (status = 200, description = "Carrinho com a nova linha", body = WithNotices<SaleDraft>),
        (status = 400, description = "Item inexistente ou sem estoque")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_cart_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddCartItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = app_state.sale_service.add_cart_item(payload, &user).await?;
    Ok(Json(cart))
}

// =============================================================================
//  VENDAS
// =============================================================================

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Ventas",
    request_body = RegisterSalePayload,
    responses(
        (status = 201, description = "Venda registrada (com avisos de estoque baixo)", body = WithNotices<Sale>),
        (status = 400, description = "Estoque insuficiente ou dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RegisterSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.register_sale(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Ventas",
    params(SaleListQuery),
    responses((status = 200, description = "Vendas visíveis ao usuário", body = [Sale])),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<SaleListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = app_state
        .sale_service
        .list_sales(&user, query.include_processed)
        .await?;
    Ok(Json(sales))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Ventas",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda", body = Sale),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.get_sale(id, &user).await?;
    Ok(Json(sale))
}

// POST /api/sales/{id}/payments
#[utoipa::path(
    post,
    path = "/api/sales/{id}/payments",
    tag = "Ventas",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = PaymentPayload,
    responses(
        (status = 200, description = "Pagamento aplicado", body = PaymentReceipt),
        (status = 400, description = "Valor inválido ou venda já paga"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn apply_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let (sale, movement) = app_state.sale_service.apply_payment(id, payload, &user).await?;
    Ok(Json(PaymentReceipt { sale, movement }))
}

// PUT /api/sales/{id}/status
#[utoipa::path(
    put,
    path = "/api/sales/{id}/status",
    tag = "Ventas",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = UpdateSaleStatusPayload,
    responses(
        (status = 200, description = "Estado atualizado", body = Sale),
        (status = 403, description = "Somente administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSaleStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.update_sale_status(id, payload, &user).await?;
    Ok(Json(sale))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Ventas",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda removida e estoque devolvido", body = Sale),
        (status = 403, description = "Somente administrador"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state.sale_service.delete_sale(id, &user).await?;
    Ok(Json(sale))
}
