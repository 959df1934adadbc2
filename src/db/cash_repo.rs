// src/db/cash_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::cash::{CashMovement, Expense},
};

#[derive(Clone, Default)]
pub struct CashRepository;

impl CashRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  MOVIMENTOS DE CAIXA
    // =========================================================================

    pub async fn list_movements<'e, E>(&self, executor: E) -> Result<Vec<CashMovement>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movements = sqlx::query_as::<_, CashMovement>(
            "SELECT * FROM cash_movements ORDER BY date DESC, id DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(movements)
    }

    pub async fn list_movements_by_creator<'e, E>(
        &self,
        executor: E,
        username: &str,
    ) -> Result<Vec<CashMovement>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movements = sqlx::query_as::<_, CashMovement>(
            "SELECT * FROM cash_movements WHERE created_by = ? ORDER BY date DESC, id DESC",
        )
        .bind(username)
        .fetch_all(executor)
        .await?;
        Ok(movements)
    }

    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        movement: &CashMovement,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO cash_movements
                (id, movement_type, amount, description, date, created_by, sale_id, payment_method)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(movement.id)
        .bind(movement.movement_type)
        .bind(movement.amount.to_string())
        .bind(&movement.description)
        .bind(movement.date)
        .bind(&movement.created_by)
        .bind(movement.sale_id)
        .bind(&movement.payment_method)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete_all_movements<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM cash_movements").execute(executor).await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  GASTOS
    // =========================================================================

    pub async fn list_expenses<'e, E>(&self, executor: E) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let expenses = sqlx::query_as::<_, Expense>("SELECT * FROM expenses ORDER BY date DESC, id DESC")
            .fetch_all(executor)
            .await?;
        Ok(expenses)
    }

    pub async fn insert_expense<'e, E>(&self, executor: E, expense: &Expense) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, date, amount, description, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id)
        .bind(expense.date)
        .bind(expense.amount.to_string())
        .bind(&expense.description)
        .bind(&expense.created_by)
        .bind(expense.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete_expense<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_expenses<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM expenses").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
