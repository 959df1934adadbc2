// src/services/maintenance_service.rs

use chrono::{TimeDelta, Utc};
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_write, error::AppError},
    db::{InventoryRepository, SaleRepository},
    models::{
        auth::User,
        system_log::{kinds, MaintenanceReport},
    },
    services::system_log_service::SystemLogService,
};

// Vendas processadas ficam guardadas por este número de dias
const PROCESSED_SALES_RETENTION_DAYS: i64 = 30;

// Autor dos registros da rotina agendada
pub const SYSTEM_ACTOR: &str = "system";

#[derive(Clone)]
pub struct MaintenanceService {
    sale_repo: SaleRepository,
    inventory_repo: InventoryRepository,
    system_log: SystemLogService,
    low_stock_threshold: i64,
    pool: SqlitePool,
}

impl MaintenanceService {
    pub fn new(
        sale_repo: SaleRepository,
        inventory_repo: InventoryRepository,
        system_log: SystemLogService,
        low_stock_threshold: i64,
        pool: SqlitePool,
    ) -> Self {
        Self { sale_repo, inventory_repo, system_log, low_stock_threshold, pool }
    }

    /// Execução manual pelo painel de opções.
    pub async fn run_now(&self, user: &User) -> Result<MaintenanceReport, AppError> {
        user.require("admin", "Solo el administrador puede ejecutar el mantenimiento")?;
        self.run_daily(&user.username).await
    }

    /// Limpa vendas antigas e registra os itens com estoque baixo.
    /// O resultado (sucesso ou erro) sempre vai para o log do sistema.
    pub async fn run_daily(&self, actor: &str) -> Result<MaintenanceReport, AppError> {
        match self.try_run(actor).await {
            Ok(report) => {
                self.system_log
                    .log(kinds::SYSTEM_UPDATE, "Actualización diaria del sistema completada", actor)
                    .await;
                tracing::info!(
                    "🔧 Manutenção concluída: {} vendas removidas, {} itens com estoque baixo",
                    report.purged_sales,
                    report.low_stock_items
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Falha na manutenção diária: {:?}", e);
                self.system_log
                    .log(kinds::SYSTEM_UPDATE_ERROR, &e.to_string(), actor)
                    .await;
                Err(e)
            }
        }
    }

    async fn try_run(&self, actor: &str) -> Result<MaintenanceReport, AppError> {
        let cutoff = Utc::now() - TimeDelta::days(PROCESSED_SALES_RETENTION_DAYS);

        let purged_sales = {
            let mut tx = begin_write(&self.pool).await?;
            let purged = self.sale_repo.purge_processed_before(&mut tx, cutoff).await?;
            tx.commit().await?;
            purged
        };

        let items = self.inventory_repo.get_all_items(&self.pool).await?;
        let low_stock: Vec<_> = items
            .iter()
            .filter(|item| item.is_low_stock(self.low_stock_threshold))
            .collect();
        for item in &low_stock {
            self.system_log
                .log(
                    kinds::LOW_INVENTORY,
                    &format!("Stock bajo para {}: {} unidades", item.name, item.quantity),
                    actor,
                )
                .await;
        }

        Ok(MaintenanceReport { purged_sales, low_stock_items: low_stock.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::db_utils::{test_pool, IdGenerator},
        db::SystemLogRepository,
        models::{
            auth::Role,
            inventory::InventoryItem,
            sale::{PaymentStatus, Sale, SaleLine, SaleStatus},
        },
    };
    use rust_decimal::Decimal;

    fn sale(id: i64, days_ago: i64, processed: bool) -> Sale {
        Sale {
            id,
            client_id: 1,
            status: SaleStatus::Completado,
            payment_status: PaymentStatus::Pagado,
            payment_method: "efectivo".into(),
            items: vec![SaleLine::new("Silla", 1, Decimal::from(10), None)],
            total: Decimal::from(10),
            amount_paid: Decimal::from(10),
            on_credit: false,
            notes: None,
            date: Utc::now() - TimeDelta::days(days_ago),
            created_by: "admin".into(),
            processed,
        }
    }

    fn item(id: i64, name: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            id,
            item_type: "mesa".into(),
            name: name.into(),
            quantity,
            price: Decimal::from(30),
            status: "disponible".into(),
            created_by: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn purges_old_processed_sales_and_logs_low_stock() {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let system_log = SystemLogService::new(SystemLogRepository::new(), ids.clone(), pool.clone());
        let inventory = InventoryRepository::new(pool.clone());
        let sales = SaleRepository::new();

        {
            let mut conn = pool.acquire().await.unwrap();
            sales.insert(&mut conn, &sale(1, 45, true)).await.unwrap();
            sales.insert(&mut conn, &sale(2, 45, false)).await.unwrap();
            sales.insert(&mut conn, &sale(3, 2, true)).await.unwrap();
            inventory.insert_item(&mut *conn, &item(10, "Mesa redonda", 5)).await.unwrap();
            inventory.insert_item(&mut *conn, &item(11, "Mesa larga", 6)).await.unwrap();
        }

        let service =
            MaintenanceService::new(sales.clone(), inventory, system_log.clone(), 5, pool.clone());
        let admin = User {
            id: 1,
            username: "admin".into(),
            name: "Administrador".into(),
            role: Role::Admin,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let report = service.run_now(&admin).await.unwrap();
        assert_eq!(report, MaintenanceReport { purged_sales: 1, low_stock_items: 1 });

        let mut conn = pool.acquire().await.unwrap();
        let remaining: Vec<i64> = sales.list(&mut conn).await.unwrap().iter().map(|s| s.id).collect();
        drop(conn);
        assert!(!remaining.contains(&1));
        assert!(remaining.contains(&2) && remaining.contains(&3));

        let logs = system_log.list().await.unwrap();
        assert_eq!(logs[0].log_type, kinds::SYSTEM_UPDATE);
        assert!(logs
            .iter()
            .any(|l| l.description == "Stock bajo para Mesa redonda: 5 unidades"));
    }
}
