// src/db/deceased_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::deceased::{DeceasedPayload, DeceasedRecord},
};

#[derive(Clone, Default)]
pub struct DeceasedRepository;

impl DeceasedRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<DeceasedRecord>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let records = sqlx::query_as::<_, DeceasedRecord>(
            "SELECT * FROM deceased ORDER BY date_of_death DESC, id DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(records)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<DeceasedRecord>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let record = sqlx::query_as::<_, DeceasedRecord>("SELECT * FROM deceased WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(record)
    }

    pub async fn insert<'e, E>(&self, executor: E, record: &DeceasedRecord) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO deceased (
                id, name, document_id, age, date_of_death, cause_of_death,
                death_location, family_contact, service_type, status, notes,
                created_at, created_by
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.document_id)
        .bind(record.age)
        .bind(record.date_of_death)
        .bind(&record.cause_of_death)
        .bind(&record.death_location)
        .bind(&record.family_contact)
        .bind(&record.service_type)
        .bind(&record.status)
        .bind(&record.notes)
        .bind(record.created_at)
        .bind(&record.created_by)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        payload: &DeceasedPayload,
    ) -> Result<Option<DeceasedRecord>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let record = sqlx::query_as::<_, DeceasedRecord>(
            r#"
            UPDATE deceased
            SET name = ?, document_id = ?, age = ?, date_of_death = ?, cause_of_death = ?,
                death_location = ?, family_contact = ?, service_type = ?, status = ?, notes = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(payload.name.trim())
        .bind(payload.document_id.trim())
        .bind(payload.age)
        .bind(payload.date_of_death)
        .bind(&payload.cause_of_death)
        .bind(&payload.death_location)
        .bind(&payload.family_contact)
        .bind(&payload.service_type)
        .bind(&payload.status)
        .bind(&payload.notes)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(record)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM deceased WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM deceased").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
