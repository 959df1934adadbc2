// src/services/inventory_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::InventoryRepository,
    models::{
        auth::User,
        inventory::{InventoryItem, InventoryItemPayload},
    },
};

const ADMIN_ONLY: &str = "Solo el administrador puede modificar el inventario";

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, ids: IdGenerator, pool: SqlitePool) -> Self {
        Self { inventory_repo, ids, pool }
    }

    // Leitura liberada para qualquer usuário logado (o caixa precisa dos itens para vender)
    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.get_all_items(&self.pool).await
    }

    pub async fn get_item(&self, id: i64) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item no encontrado".into()))
    }

    pub async fn create_item(
        &self,
        payload: InventoryItemPayload,
        user: &User,
    ) -> Result<InventoryItem, AppError> {
        user.require("inventario:edit", ADMIN_ONLY)?;
        payload.validate()?;

        let item = InventoryItem {
            id: self.ids.next_id(),
            item_type: payload.item_type,
            name: payload.name.trim().to_string(),
            quantity: payload.quantity,
            price: payload.price,
            status: payload.status,
            created_by: user.username.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.inventory_repo.insert_item(&self.pool, &item).await?;

        tracing::info!("📦 Item '{}' adicionado ao inventário por {}", item.name, user.username);
        Ok(item)
    }

    pub async fn update_item(
        &self,
        id: i64,
        payload: InventoryItemPayload,
        user: &User,
    ) -> Result<InventoryItem, AppError> {
        user.require("inventario:edit", ADMIN_ONLY)?;
        payload.validate()?;

        self.inventory_repo
            .update_item(&self.pool, id, &payload, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Item no encontrado".into()))
    }

    pub async fn delete_item(&self, id: i64, user: &User) -> Result<(), AppError> {
        user.require("inventario:edit", ADMIN_ONLY)?;

        if !self.inventory_repo.delete_item(&self.pool, id).await? {
            return Err(AppError::NotFound("Item no encontrado".into()));
        }
        Ok(())
    }
}
