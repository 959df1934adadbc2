// src/db/system_log_repo.rs

use sqlx::{Executor, Sqlite, SqliteConnection};

use crate::{common::error::AppError, models::system_log::SystemLog};

#[derive(Clone, Default)]
pub struct SystemLogRepository;

impl SystemLogRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<SystemLog>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let logs = sqlx::query_as::<_, SystemLog>("SELECT * FROM system_logs ORDER BY id DESC")
            .fetch_all(executor)
            .await?;
        Ok(logs)
    }

    pub async fn insert<'e, E>(&self, executor: E, log: &SystemLog) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO system_logs (id, log_type, description, date, user) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(log.id)
        .bind(&log.log_type)
        .bind(&log.description)
        .bind(log.date)
        .bind(&log.user)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Remove as entradas mais antigas além de `keep`.
    pub async fn trim<'e, E>(&self, executor: E, keep: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM system_logs
            WHERE id NOT IN (SELECT id FROM system_logs ORDER BY id DESC LIMIT ?)
            "#,
        )
        .bind(keep)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Substitui o log inteiro (importação).
    pub async fn replace_all(
        &self,
        conn: &mut SqliteConnection,
        logs: &[SystemLog],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM system_logs").execute(&mut *conn).await?;
        for log in logs {
            self.insert(&mut *conn, log).await?;
        }
        Ok(())
    }
}
