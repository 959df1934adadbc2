// src/models/action.rs

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{
    auth::LoginUserPayload,
    cash::CashMovementPayload,
    client::ClientPayload,
    inventory::InventoryItemPayload,
    sale::{RegisterSalePayload, UpdateSaleStatusPayload},
};

// Nomes aceitos no campo "action"
pub const ACTIONS: [&str; 12] = [
    "login",
    "addInventoryItem",
    "updateInventoryItem",
    "deleteInventoryItem",
    "addSale",
    "updateSale",
    "deleteSale",
    "addClient",
    "updateClient",
    "deleteClient",
    "getCashMovements",
    "addCashMovement",
];

/// Corpo do endpoint de ações: `{"action": "<nome>", ...campos}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    Login(LoginUserPayload),

    AddInventoryItem(InventoryItemPayload),
    UpdateInventoryItem {
        id: i64,
        #[serde(flatten)]
        item: InventoryItemPayload,
    },
    DeleteInventoryItem {
        id: i64,
    },

    AddSale(RegisterSalePayload),
    UpdateSale {
        sale_id: i64,
        #[serde(flatten)]
        state: UpdateSaleStatusPayload,
    },
    DeleteSale {
        sale_id: i64,
    },

    AddClient(ClientPayload),
    UpdateClient {
        id: i64,
        #[serde(flatten)]
        client: ClientPayload,
    },
    DeleteClient {
        id: i64,
    },

    GetCashMovements {
        #[serde(default)]
        start_date: Option<NaiveDate>,
        #[serde(default)]
        end_date: Option<NaiveDate>,
    },
    AddCashMovement(CashMovementPayload),
}
