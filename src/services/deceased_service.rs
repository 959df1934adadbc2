// src/services/deceased_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::DeceasedRepository,
    models::{
        auth::User,
        deceased::{DeceasedPayload, DeceasedRecord},
    },
};

const NOT_FOUND: &str = "Registro no encontrado";

#[derive(Clone)]
pub struct DeceasedService {
    repo: DeceasedRepository,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl DeceasedService {
    pub fn new(repo: DeceasedRepository, ids: IdGenerator, pool: SqlitePool) -> Self {
        Self { repo, ids, pool }
    }

    pub async fn list(&self, user: &User) -> Result<Vec<DeceasedRecord>, AppError> {
        user.require("fallecidos:view", "No tiene acceso a esta sección")?;
        self.repo.list(&self.pool).await
    }

    pub async fn get(&self, id: i64, user: &User) -> Result<DeceasedRecord, AppError> {
        user.require("fallecidos:view", "No tiene acceso a esta sección")?;
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    pub async fn create(&self, payload: DeceasedPayload, user: &User) -> Result<DeceasedRecord, AppError> {
        user.require("fallecidos:edit", "Solo el administrador puede registrar fallecidos")?;
        payload.validate()?;

        let record = DeceasedRecord {
            id: self.ids.next_id(),
            name: payload.name.trim().to_string(),
            document_id: payload.document_id.trim().to_string(),
            age: payload.age,
            date_of_death: payload.date_of_death,
            cause_of_death: payload.cause_of_death,
            death_location: payload.death_location,
            family_contact: payload.family_contact,
            service_type: payload.service_type,
            status: payload.status,
            notes: payload.notes,
            created_at: Utc::now(),
            created_by: user.username.clone(),
        };
        self.repo.insert(&self.pool, &record).await?;
        Ok(record)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: DeceasedPayload,
        user: &User,
    ) -> Result<DeceasedRecord, AppError> {
        user.require("fallecidos:edit", "Solo el administrador puede modificar fallecidos")?;
        payload.validate()?;

        self.repo
            .update(&self.pool, id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    pub async fn delete(&self, id: i64, user: &User) -> Result<(), AppError> {
        user.require("fallecidos:edit", "Solo el administrador puede eliminar fallecidos")?;

        if !self.repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(NOT_FOUND.into()));
        }
        Ok(())
    }
}
