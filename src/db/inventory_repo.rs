// src/db/inventory_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use crate::{
    common::error::AppError,
    models::{
        dashboard::TypeCount,
        inventory::{InventoryItem, InventoryItemPayload},
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn get_all_items<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory ORDER BY name COLLATE NOCASE ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    /// Busca por nome sem diferenciar maiúsculas (inclusive acentuadas).
    /// O índice NOCASE resolve os nomes ASCII; só nomes acentuados caem na varredura.
    pub async fn find_by_name(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<InventoryItem>, AppError> {
        let name = name.trim();
        let exact = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory WHERE name = ? COLLATE NOCASE ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        if exact.is_some() {
            return Ok(exact);
        }

        let wanted = name.to_lowercase();
        let items = self.get_all_items(&mut *conn).await?;
        Ok(items
            .into_iter()
            .find(|item| item.name.to_lowercase() == wanted))
    }

    /// Agregados do painel: número de itens por tipo e total de unidades.
    pub async fn stats(&self) -> Result<(Vec<TypeCount>, i64), AppError> {
        let counts = sqlx::query_as::<_, TypeCount>(
            "SELECT item_type, COUNT(*) AS item_count FROM inventory GROUP BY item_type",
        )
        .fetch_all(&self.pool)
        .await?;

        let total_units: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok((counts, total_units))
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    pub async fn insert_item<'e, E>(&self, executor: E, item: &InventoryItem) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO inventory
                (id, item_type, name, quantity, price, status, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id)
        .bind(&item.item_type)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.price.to_string())
        .bind(&item.status)
        .bind(&item.created_by)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: i64,
        payload: &InventoryItemPayload,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory
            SET item_type = ?, name = ?, quantity = ?, price = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&payload.item_type)
        .bind(payload.name.trim())
        .bind(payload.quantity)
        .bind(payload.price.to_string())
        .bind(&payload.status)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Baixa de estoque. Nunca fica negativo: o resultado é limitado a zero.
    /// Devolve a nova quantidade.
    pub async fn decrement_quantity<'e, E>(
        &self,
        executor: E,
        id: i64,
        quantity: i64,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let remaining: i64 = sqlx::query_scalar(
            r#"
            UPDATE inventory
            SET quantity = MAX(quantity - ?, 0), updated_at = ?
            WHERE id = ?
            RETURNING quantity
            "#,
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(remaining)
    }

    pub async fn increment_quantity<'e, E>(
        &self,
        executor: E,
        id: i64,
        quantity: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE inventory SET quantity = quantity + ?, updated_at = ? WHERE id = ?")
            .bind(quantity)
            .bind(Utc::now())
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM inventory").execute(executor).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::db_utils::test_pool;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn name_lookup_ignores_case_including_accented_letters() {
        let pool = test_pool().await;
        let repo = InventoryRepository::new(pool.clone());
        for (id, name) in [(1, "Carpa Grande"), (2, "Ánfora")] {
            let item = InventoryItem {
                id,
                item_type: "carpa".into(),
                name: name.into(),
                quantity: 3,
                price: Decimal::from(50),
                status: "disponible".into(),
                created_by: "admin".into(),
                created_at: Utc::now(),
                updated_at: None,
            };
            repo.insert_item(&pool, &item).await.unwrap();
        }

        let mut conn = pool.acquire().await.unwrap();
        let ascii = repo.find_by_name(&mut conn, "  carpa GRANDE ").await.unwrap();
        assert_eq!(ascii.map(|i| i.id), Some(1));

        // NOCASE não dobra "Á", a varredura resolve
        let accented = repo.find_by_name(&mut conn, "ánfora").await.unwrap();
        assert_eq!(accented.map(|i| i.id), Some(2));

        assert!(repo.find_by_name(&mut conn, "Mesa").await.unwrap().is_none());
    }
}
