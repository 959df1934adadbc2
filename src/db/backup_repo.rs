// src/db/backup_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::backup::{Backup, BackupSummary},
};

#[derive(Clone, Default)]
pub struct BackupRepository;

impl BackupRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, backup: &Backup) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO backups (id, kind, created_at, created_by, payload) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(backup.id)
        .bind(backup.kind)
        .bind(backup.created_at)
        .bind(&backup.created_by)
        .bind(&backup.payload)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Lista sem o payload (pode ser grande)
    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<BackupSummary>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let backups = sqlx::query_as::<_, BackupSummary>(
            "SELECT id, kind, created_at, created_by FROM backups ORDER BY id DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(backups)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Backup>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let backup = sqlx::query_as::<_, Backup>("SELECT * FROM backups WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(backup)
    }
}
