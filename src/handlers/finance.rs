// src/handlers/finance.rs

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
    models::cash::{CashMovement, CashMovementPayload, CashSummary, Expense, ExpensePayload},
};

// =============================================================================
//  MOVIMENTOS DE CAIXA
// =============================================================================

// GET /api/cash-movements
#[utoipa::path(
    get,
    path = "/api/cash-movements",
    tag = "Cuadre",
    responses((status = 200, description = "Movimentos visíveis ao usuário", body = [CashMovement])),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state.finance_service.list_movements(&user).await?;
    Ok(Json(movements))
}

// POST /api/cash-movements
#[utoipa::path(
    post,
    path = "/api/cash-movements",
    tag = "Cuadre",
    request_body = CashMovementPayload,
    responses(
        (status = 201, description = "Movimento registrado", body = CashMovement),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_movement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CashMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let movement = app_state.finance_service.add_movement(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

// GET /api/cash-movements/summary
#[utoipa::path(
    get,
    path = "/api/cash-movements/summary",
    tag = "Cuadre",
    responses((status = 200, description = "Entradas, saídas e saldo", body = CashSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.finance_service.summary(&user).await?;
    Ok(Json(summary))
}

// =============================================================================
//  GASTOS
// =============================================================================

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Gastos",
    responses(
        (status = 200, description = "Gastos registrados", body = [Expense]),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = app_state.finance_service.list_expenses(&user).await?;
    Ok(Json(expenses))
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Gastos",
    request_body = ExpensePayload,
    responses(
        (status = 201, description = "Gasto registrado", body = Expense),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = app_state.finance_service.add_expense(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

// DELETE /api/expenses/{id}
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Gastos",
    params(("id" = i64, Path, description = "ID do gasto")),
    responses(
        (status = 204, description = "Gasto removido"),
        (status = 404, description = "Gasto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.finance_service.delete_expense(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
