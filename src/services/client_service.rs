// src/services/client_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::ClientRepository,
    models::{
        auth::User,
        client::{Client, ClientPayload},
    },
};

const ADMIN_ONLY: &str = "Solo el administrador puede modificar clientes";

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl ClientService {
    pub fn new(repo: ClientRepository, ids: IdGenerator, pool: SqlitePool) -> Self {
        Self { repo, ids, pool }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list(&self.pool).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".into()))
    }

    pub async fn create_client(&self, payload: ClientPayload, user: &User) -> Result<Client, AppError> {
        user.require("clientes:edit", ADMIN_ONLY)?;
        payload.validate()?;

        let client = Client {
            id: self.ids.next_id(),
            name: payload.name.trim().to_string(),
            document_id: payload.document_id.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            address: payload.address.trim().to_string(),
            email: payload.email,
            created_by: user.username.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.repo.insert(&self.pool, &client).await?;
        Ok(client)
    }

    pub async fn update_client(
        &self,
        id: i64,
        payload: ClientPayload,
        user: &User,
    ) -> Result<Client, AppError> {
        user.require("clientes:edit", ADMIN_ONLY)?;
        payload.validate()?;

        self.repo
            .update(&self.pool, id, &payload, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".into()))
    }

    pub async fn delete_client(&self, id: i64, user: &User) -> Result<(), AppError> {
        user.require("clientes:edit", ADMIN_ONLY)?;

        if !self.repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound("Cliente no encontrado".into()));
        }
        Ok(())
    }
}
