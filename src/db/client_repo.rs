// src/db/client_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::client::{Client, ClientPayload},
};

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn insert<'e, E>(&self, executor: E, client: &Client) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO clients
                (id, name, document_id, phone, address, email, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.document_id)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.email)
        .bind(&client.created_by)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        payload: &ClientPayload,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        // created_at / created_by ficam intactos
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = ?, document_id = ?, phone = ?, address = ?, email = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(payload.name.trim())
        .bind(payload.document_id.trim())
        .bind(payload.phone.trim())
        .bind(payload.address.trim())
        .bind(&payload.email)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM clients").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
