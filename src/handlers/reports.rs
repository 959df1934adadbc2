// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::report::{
        CashReport, ClientReportRow, DailyActivityReport, DateRange, DateRangeQuery, SalesReport,
    },
};

// GET /api/reports/sales
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    tag = "Reportes",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Totais de vendas no período", body = SalesReport),
        (status = 400, description = "Período inválido"),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = DateRange::try_from(query)?;
    let report = app_state.report_service.sales_report(range, &user).await?;
    Ok(Json(report))
}

// GET /api/reports/clients
#[utoipa::path(
    get,
    path = "/api/reports/clients",
    tag = "Reportes",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Gasto por cliente no período", body = [ClientReportRow]),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn client_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = DateRange::try_from(query)?;
    let rows = app_state.report_service.client_report(range, &user).await?;
    Ok(Json(rows))
}

// GET /api/reports/cash
#[utoipa::path(
    get,
    path = "/api/reports/cash",
    tag = "Reportes",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Cuadre de caja por dia", body = CashReport),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn cash_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = DateRange::try_from(query)?;
    let report = app_state.report_service.cash_report(range, &user).await?;
    Ok(Json(report))
}

// GET /api/reports/daily
#[utoipa::path(
    get,
    path = "/api/reports/daily",
    tag = "Reportes",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Atividade agrupada por dia", body = DailyActivityReport),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn daily_activity_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = DateRange::try_from(query)?;
    let report = app_state.report_service.daily_activity_report(range, &user).await?;
    Ok(Json(report))
}
