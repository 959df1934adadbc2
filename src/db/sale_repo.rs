// src/db/sale_repo.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqliteConnection};

use crate::{
    common::error::AppError,
    models::sale::{Sale, SaleLine},
};

// Linha com a chave da venda, usada para agrupar
#[derive(sqlx::FromRow)]
struct KeyedLine {
    sale_id: i64,
    #[sqlx(flatten)]
    line: SaleLine,
}

#[derive(Clone, Default)]
pub struct SaleRepository;

impl SaleRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    /// Todas as vendas (mais recentes primeiro), com as linhas.
    pub async fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY date DESC, id DESC")
            .fetch_all(&mut *conn)
            .await?;
        self.attach_lines(conn, sales).await
    }

    pub async fn list_by_creator(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE created_by = ? ORDER BY date DESC, id DESC",
        )
        .bind(username)
        .fetch_all(&mut *conn)
        .await?;
        self.attach_lines(conn, sales).await
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match sale {
            Some(mut sale) => {
                sale.items = sqlx::query_as::<_, SaleLine>(
                    "SELECT * FROM sale_items WHERE sale_id = ? ORDER BY position ASC",
                )
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;
                Ok(Some(sale))
            }
            None => Ok(None),
        }
    }

    async fn attach_lines(
        &self,
        conn: &mut SqliteConnection,
        mut sales: Vec<Sale>,
    ) -> Result<Vec<Sale>, AppError> {
        let lines = sqlx::query_as::<_, KeyedLine>(
            "SELECT * FROM sale_items ORDER BY sale_id ASC, position ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut by_sale: HashMap<i64, Vec<SaleLine>> = HashMap::new();
        for keyed in lines {
            by_sale.entry(keyed.sale_id).or_default().push(keyed.line);
        }
        for sale in &mut sales {
            sale.items = by_sale.remove(&sale.id).unwrap_or_default();
        }
        Ok(sales)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    /// Grava a venda e suas linhas. Deve rodar dentro de uma transação.
    pub async fn insert(&self, conn: &mut SqliteConnection, sale: &Sale) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, client_id, status, payment_status, payment_method,
                total, amount_paid, on_credit, notes, date, created_by, processed
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.id)
        .bind(sale.client_id)
        .bind(sale.status)
        .bind(sale.payment_status)
        .bind(&sale.payment_method)
        .bind(sale.total.to_string())
        .bind(sale.amount_paid.to_string())
        .bind(sale.on_credit)
        .bind(&sale.notes)
        .bind(sale.date)
        .bind(&sale.created_by)
        .bind(sale.processed)
        .execute(&mut *conn)
        .await?;

        for (position, line) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items
                    (sale_id, position, name, quantity, price, subtotal, inventory_item_id)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(sale.id)
            .bind(position as i64)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price.to_string())
            .bind(line.subtotal.to_string())
            .bind(line.inventory_item_id)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Persiste o estado de pagamento (status, valores e flag de processada).
    pub async fn update_payment_state<'e, E>(&self, executor: E, sale: &Sale) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            UPDATE sales
            SET status = ?, payment_status = ?, amount_paid = ?, processed = ?
            WHERE id = ?
            "#,
        )
        .bind(sale.status)
        .bind(sale.payment_status)
        .bind(sale.amount_paid.to_string())
        .bind(sale.processed)
        .bind(sale.id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all(&self, conn: &mut SqliteConnection) -> Result<u64, AppError> {
        sqlx::query("DELETE FROM sale_items").execute(&mut *conn).await?;
        let result = sqlx::query("DELETE FROM sales").execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    /// Apaga as vendas processadas anteriores a `cutoff`. Devolve quantas saíram.
    pub async fn purge_processed_before(
        &self,
        conn: &mut SqliteConnection,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        sqlx::query(
            r#"
            DELETE FROM sale_items
            WHERE sale_id IN (SELECT id FROM sales WHERE processed = 1 AND date < ?)
            "#,
        )
        .bind(cutoff)
        .execute(&mut *conn)
        .await?;
        let result = sqlx::query("DELETE FROM sales WHERE processed = 1 AND date < ?")
            .bind(cutoff)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
