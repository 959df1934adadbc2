// src/services/system_log_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::SystemLogRepository,
    models::system_log::{SystemLog, MAX_SYSTEM_LOGS},
};

#[derive(Clone)]
pub struct SystemLogService {
    repo: SystemLogRepository,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl SystemLogService {
    pub fn new(repo: SystemLogRepository, ids: IdGenerator, pool: SqlitePool) -> Self {
        Self { repo, ids, pool }
    }

    /// Registra um evento. Falhas vão só para o tracing, nunca para o chamador.
    pub async fn log(&self, log_type: &str, description: &str, user: &str) {
        if let Err(e) = self.try_log(log_type, description, user).await {
            tracing::warn!("Falha ao gravar log do sistema ({}): {:?}", log_type, e);
        }
    }

    async fn try_log(&self, log_type: &str, description: &str, user: &str) -> Result<(), AppError> {
        let entry = SystemLog {
            id: self.ids.next_id(),
            log_type: log_type.to_string(),
            description: description.to_string(),
            date: Utc::now(),
            user: user.to_string(),
        };

        let mut tx = self.pool.begin().await?;
        self.repo.insert(&mut *tx, &entry).await?;
        self.repo.trim(&mut *tx, MAX_SYSTEM_LOGS).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<SystemLog>, AppError> {
        self.repo.list(&self.pool).await
    }
}
