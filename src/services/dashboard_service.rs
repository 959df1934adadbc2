// src/services/dashboard_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{CashRepository, ClientRepository, InventoryRepository, SaleRepository},
    models::{
        auth::User,
        dashboard::{DashboardSummary, TypeCount},
        inventory::DASHBOARD_ITEM_TYPES,
    },
    services::report_service::recent_activity,
};

const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    sale_repo: SaleRepository,
    cash_repo: CashRepository,
    client_repo: ClientRepository,
    inventory_repo: InventoryRepository,
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(
        sale_repo: SaleRepository,
        cash_repo: CashRepository,
        client_repo: ClientRepository,
        inventory_repo: InventoryRepository,
        pool: SqlitePool,
    ) -> Self {
        Self { sale_repo, cash_repo, client_repo, inventory_repo, pool }
    }

    pub async fn get_summary(&self, user: &User) -> Result<DashboardSummary, AppError> {
        // 1. Dados visíveis para o usuário (caixa: só os próprios)
        let (sales, movements) = {
            let mut conn = self.pool.acquire().await?;
            if user.sees_only_own_records() {
                (
                    self.sale_repo.list_by_creator(&mut conn, &user.username).await?,
                    self.cash_repo
                        .list_movements_by_creator(&mut *conn, &user.username)
                        .await?,
                )
            } else {
                (
                    self.sale_repo.list(&mut conn).await?,
                    self.cash_repo.list_movements(&mut *conn).await?,
                )
            }
        };

        // 2. Vendas de hoje (dia UTC)
        let today = Utc::now().date_naive();
        let todays: Vec<_> = sales.iter().filter(|s| s.date.date_naive() == today).collect();
        let income_today: Decimal = todays.iter().map(|s| s.total).sum();

        // 3. Cards de inventário (só admin)
        let (inventory_by_type, total_units) = if user.is_admin() {
            let (counts, total_units) = self.inventory_repo.stats().await?;
            let by_type: Vec<TypeCount> = DASHBOARD_ITEM_TYPES
                .iter()
                .map(|t| TypeCount {
                    item_type: t.to_string(),
                    item_count: counts
                        .iter()
                        .find(|c| c.item_type == *t)
                        .map(|c| c.item_count)
                        .unwrap_or(0),
                })
                .collect();
            (Some(by_type), Some(total_units))
        } else {
            (None, None)
        };

        // 4. Atividade recente
        let client_names: HashMap<i64, String> = self
            .client_repo
            .list(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(DashboardSummary {
            sales_today: todays.len(),
            income_today,
            inventory_by_type,
            total_units,
            recent_activity: recent_activity(&sales, &movements, &client_names, RECENT_ACTIVITY_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::db_utils::test_pool,
        models::{
            auth::Role,
            cash::{CashMovement, MovementType},
            sale::{PaymentStatus, Sale, SaleLine, SaleStatus},
        },
    };

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

    fn sale(id: i64, created_by: &str, total: i64) -> Sale {
        Sale {
            id,
            client_id: 99,
            status: SaleStatus::Completado,
            payment_status: PaymentStatus::Pagado,
            payment_method: "efectivo".into(),
            items: vec![SaleLine::new("Silla", 1, Decimal::from(total), None)],
            total: Decimal::from(total),
            amount_paid: Decimal::from(total),
            on_credit: false,
            notes: None,
            date: Utc::now(),
            created_by: created_by.into(),
            processed: false,
        }
    }

    #[tokio::test]
    async fn cashier_summary_only_counts_own_sales_and_hides_stock() {
        let pool = test_pool().await;
        let sales = SaleRepository::new();
        let cash = CashRepository::new();
        {
            let mut conn = pool.acquire().await.unwrap();
            sales.insert(&mut conn, &sale(1, "admin", 100)).await.unwrap();
            sales.insert(&mut conn, &sale(2, "cajero1", 40)).await.unwrap();
            cash.insert_movement(
                &mut *conn,
                &CashMovement {
                    id: 3,
                    movement_type: MovementType::Ingreso,
                    amount: Decimal::from(40),
                    description: "Pago".into(),
                    date: Utc::now(),
                    created_by: "cajero1".into(),
                    sale_id: Some(2),
                    payment_method: None,
                },
            )
            .await
            .unwrap();
        }

        let service = DashboardService::new(
            sales,
            cash,
            ClientRepository::new(),
            InventoryRepository::new(pool.clone()),
            pool,
        );

        let own = service.get_summary(&user("cajero1", Role::Cajero)).await.unwrap();
        assert_eq!(own.sales_today, 1);
        assert_eq!(own.income_today, Decimal::from(40));
        assert!(own.inventory_by_type.is_none());
        assert!(own.recent_activity.iter().all(|a| a.user == "cajero1"));

        let all = service.get_summary(&user("admin", Role::Admin)).await.unwrap();
        assert_eq!(all.sales_today, 2);
        assert_eq!(all.inventory_by_type.unwrap().len(), DASHBOARD_ITEM_TYPES.len());
        assert_eq!(all.total_units, Some(0));
    }
}
