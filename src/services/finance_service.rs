// src/services/finance_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::CashRepository,
    models::{
        auth::User,
        cash::{CashMovement, CashMovementPayload, CashSummary, Expense, ExpensePayload},
    },
};

#[derive(Clone)]
pub struct FinanceService {
    repo: CashRepository,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl FinanceService {
    pub fn new(repo: CashRepository, ids: IdGenerator, pool: SqlitePool) -> Self {
        Self { repo, ids, pool }
    }

    // =========================================================================
    //  MOVIMENTOS (cuadre)
    // =========================================================================

    /// Movimentos visíveis para o usuário: o caixa só vê os próprios.
    pub async fn list_movements(&self, user: &User) -> Result<Vec<CashMovement>, AppError> {
        user.require("cuadre:view", "No tiene acceso a esta sección")?;
        if user.sees_only_own_records() {
            self.repo
                .list_movements_by_creator(&self.pool, &user.username)
                .await
        } else {
            self.repo.list_movements(&self.pool).await
        }
    }

    pub async fn add_movement(
        &self,
        payload: CashMovementPayload,
        user: &User,
    ) -> Result<CashMovement, AppError> {
        user.require("cuadre:edit", "No tiene permiso para registrar movimientos")?;
        payload.validate()?;

        let movement = CashMovement {
            id: self.ids.next_id(),
            movement_type: payload.movement_type,
            amount: payload.amount,
            description: payload.description.trim().to_string(),
            date: Utc::now(),
            created_by: user.username.clone(),
            sale_id: None,
            payment_method: payload.payment_method,
        };
        self.repo.insert_movement(&self.pool, &movement).await?;
        Ok(movement)
    }

    pub async fn summary(&self, user: &User) -> Result<CashSummary, AppError> {
        let movements = self.list_movements(user).await?;
        Ok(CashSummary::from_movements(&movements))
    }

    // =========================================================================
    //  GASTOS
    // =========================================================================

    pub async fn list_expenses(&self, user: &User) -> Result<Vec<Expense>, AppError> {
        user.require("gastos:view", "No tiene acceso a esta sección")?;
        self.repo.list_expenses(&self.pool).await
    }

    pub async fn add_expense(&self, payload: ExpensePayload, user: &User) -> Result<Expense, AppError> {
        user.require("gastos:edit", "Solo el administrador puede registrar gastos")?;
        payload.validate()?;

        let now = Utc::now();
        let expense = Expense {
            id: self.ids.next_id(),
            date: payload.date.unwrap_or(now),
            amount: payload.amount,
            description: payload.description.trim().to_string(),
            created_by: user.username.clone(),
            created_at: now,
        };
        self.repo.insert_expense(&self.pool, &expense).await?;
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: i64, user: &User) -> Result<(), AppError> {
        user.require("gastos:edit", "Solo el administrador puede eliminar gastos")?;

        if !self.repo.delete_expense(&self.pool, id).await? {
            return Err(AppError::NotFound("Gasto no encontrado".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::db_utils::test_pool, models::auth::Role};
    use rust_decimal::Decimal;

    fn user(username: &str, role: Role) -> User {
        User {
            id: 1,
            username: username.into(),
            name: username.into(),
            role,
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn movement(json: &str) -> CashMovementPayload {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn cashier_sees_only_own_movements() {
        let pool = test_pool().await;
        let service = FinanceService::new(CashRepository::new(), IdGenerator::new(), pool);
        let admin = user("admin", Role::Admin);
        let cashier = user("cajero1", Role::Cajero);

        service
            .add_movement(movement(r#"{"type": "ingreso", "amount": 500, "description": "Velatorio"}"#), &admin)
            .await
            .unwrap();
        service
            .add_movement(movement(r#"{"type": "egreso", "amount": 200, "description": "Flores"}"#), &cashier)
            .await
            .unwrap();

        let own = service.list_movements(&cashier).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].created_by, "cajero1");

        let summary = service.summary(&admin).await.unwrap();
        assert_eq!(summary.balance, Decimal::from(300));
    }

    #[tokio::test]
    async fn expenses_are_admin_only() {
        let pool = test_pool().await;
        let service = FinanceService::new(CashRepository::new(), IdGenerator::new(), pool);
        let payload: ExpensePayload =
            serde_json::from_str(r#"{"amount": 50, "description": "Luz"}"#).unwrap();

        let result = service
            .add_expense(payload.clone(), &user("cajero1", Role::Cajero))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let admin = user("admin", Role::Admin);
        let expense = service.add_expense(payload, &admin).await.unwrap();
        assert_eq!(service.list_expenses(&admin).await.unwrap().len(), 1);

        service.delete_expense(expense.id, &admin).await.unwrap();
        assert!(matches!(
            service.delete_expense(expense.id, &admin).await,
            Err(AppError::NotFound(_))
        ));
    }
}
