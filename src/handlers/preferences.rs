// src/handlers/preferences.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::settings::{UpdatePreferencesRequest, UserPreferences},
};

// GET /api/preferences
#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "Preferencias",
    responses((status = 200, description = "Preferências do usuário", body = UserPreferences)),
    security(("api_jwt" = []))
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let prefs = app_state.preferences_service.get_preferences(&user).await?;
    Ok(Json(prefs))
}

// PUT /api/preferences
#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "Preferencias",
    request_body = UpdatePreferencesRequest,
    responses(
        (status = 200, description = "Preferências salvas", body = UserPreferences),
        (status = 400, description = "Tema ou cor inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_preferences(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prefs = app_state
        .preferences_service
        .update_preferences(&user, payload)
        .await?;
    Ok(Json(prefs))
}
