// src/handlers/actions.rs

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ActionResponse},
    config::AppState,
    middleware::auth::bearer_token,
    models::{
        action::{Command, ACTIONS},
        auth::{LoginUserPayload, User},
        report::DateRange,
    },
};

const MISSING_ACTION: &str = "Acción no especificada";
const UNKNOWN_ACTION: &str = "Acción no válida";
const INVALID_DATA: &str = "Datos inválidos";

fn to_data<T: Serialize>(value: &T) -> Result<Option<Value>, AppError> {
    Ok(Some(serde_json::to_value(value)?))
}

/// Lê o corpo e decide qual comando executar. Erros já saem no formato do envelope.
pub fn parse_command(body: &[u8]) -> Result<Command, ActionResponse> {
    let raw: Value =
        serde_json::from_slice(body).map_err(|_| ActionResponse::fail(INVALID_DATA))?;

    match raw.get("action") {
        None | Some(Value::Null) => return Err(ActionResponse::fail(MISSING_ACTION)),
        Some(Value::String(name)) if ACTIONS.contains(&name.as_str()) => {}
        Some(_) => return Err(ActionResponse::fail(UNKNOWN_ACTION)),
    }

    serde_json::from_value(raw).map_err(|e| {
        tracing::debug!("Payload de ação inválido: {}", e);
        ActionResponse::fail(INVALID_DATA)
    })
}

// POST /api/actions
#[utoipa::path(
    post,
    path = "/api/actions",
    tag = "Acciones",
    request_body(content = Object, description = "{\"action\": \"<nome>\", ...campos}"),
    responses(
        (status = 200, description = "Envelope {success, data, message, timestamp}", body = ActionResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn dispatch(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ActionResponse> {
    let command = match parse_command(&body) {
        Ok(command) => command,
        Err(response) => return Json(response),
    };

    match execute(&app_state, &headers, command).await {
        Ok(response) => Json(response),
        Err(e) => Json(ActionResponse::from(e)),
    }
}

async fn execute(
    state: &AppState,
    headers: &HeaderMap,
    command: Command,
) -> Result<ActionResponse, AppError> {
    match command {
        // A única ação sem sessão
        Command::Login(payload) => login(state, payload).await,
        command => {
            let token = bearer_token(headers).ok_or(AppError::InvalidToken)?;
            let user = state.auth_service.validate_token(token).await?;
            run_as(state, &user, command).await
        }
    }
}

async fn login(state: &AppState, payload: LoginUserPayload) -> Result<ActionResponse, AppError> {
    payload.validate()?;
    let auth = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;
    Ok(ActionResponse::ok(to_data(&auth)?, "Login exitoso"))
}

async fn run_as(state: &AppState, user: &User, command: Command) -> Result<ActionResponse, AppError> {
    let response = match command {
        Command::Login(payload) => return login(state, payload).await,

        // --- Inventario ---
        Command::AddInventoryItem(payload) => {
            let item = state.inventory_service.create_item(payload, user).await?;
            ActionResponse::ok(to_data(&item)?, "Ítem agregado con éxito")
        }
        Command::UpdateInventoryItem { id, item } => {
            let item = state.inventory_service.update_item(id, item, user).await?;
            ActionResponse::ok(to_data(&item)?, "Ítem actualizado con éxito")
        }
        Command::DeleteInventoryItem { id } => {
            state.inventory_service.delete_item(id, user).await?;
            ActionResponse::ok(None, "Ítem eliminado con éxito")
        }

        // --- Ventas ---
        Command::AddSale(payload) => {
            let sale = state.sale_service.register_sale(payload, user).await?;
            ActionResponse::ok(to_data(&sale)?, "Venta registrada con éxito")
        }
        Command::UpdateSale { sale_id, state: payload } => {
            let sale = state.sale_service.update_sale_status(sale_id, payload, user).await?;
            ActionResponse::ok(to_data(&sale)?, "Venta actualizada con éxito")
        }
        Command::DeleteSale { sale_id } => {
            let sale = state.sale_service.delete_sale(sale_id, user).await?;
            ActionResponse::ok(to_data(&sale)?, "Venta eliminada con éxito")
        }

        // --- Clientes ---
        Command::AddClient(payload) => {
            let client = state.client_service.create_client(payload, user).await?;
            ActionResponse::ok(to_data(&client)?, "Cliente agregado con éxito")
        }
        Command::UpdateClient { id, client } => {
            let client = state.client_service.update_client(id, client, user).await?;
            ActionResponse::ok(to_data(&client)?, "Cliente actualizado con éxito")
        }
        Command::DeleteClient { id } => {
            state.client_service.delete_client(id, user).await?;
            ActionResponse::ok(None, "Cliente eliminado con éxito")
        }

        // --- Caja ---
        Command::GetCashMovements { start_date, end_date } => {
            let mut movements = state.finance_service.list_movements(user).await?;
            if let (Some(start), Some(end)) = (start_date, end_date) {
                let range = DateRange::from_days(start, end)?;
                movements.retain(|m| range.contains(m.date));
            }
            ActionResponse::ok(to_data(&movements)?, "Movimientos de caja obtenidos con éxito")
        }
        Command::AddCashMovement(payload) => {
            let movement = state.finance_service.add_movement(payload, user).await?;
            ActionResponse::ok(to_data(&movement)?, "Movimiento de caja agregado con éxito")
        }
    };
    Ok(response)
}
