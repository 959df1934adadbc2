// src/services/backup_service.rs

use chrono::Utc;
use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    common::{
        db_utils::{begin_write, IdGenerator},
        error::AppError,
    },
    db::{
        BackupRepository, CashRepository, ClientRepository, DeceasedRepository,
        InventoryRepository, SaleRepository, SystemLogRepository,
    },
    models::{
        auth::User,
        backup::{
            Backup, BackupKind, BackupSummary, ImportSummary, Snapshot, SnapshotMetadata,
            CLEAR_CONFIRMATION, SYSTEM_VERSION,
        },
        system_log::kinds,
    },
    services::system_log_service::SystemLogService,
};

#[derive(Clone)]
pub struct BackupService {
    inventory_repo: InventoryRepository,
    sale_repo: SaleRepository,
    client_repo: ClientRepository,
    cash_repo: CashRepository,
    deceased_repo: DeceasedRepository,
    log_repo: SystemLogRepository,
    backup_repo: BackupRepository,
    system_log: SystemLogService,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl BackupService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        inventory_repo: InventoryRepository,
        sale_repo: SaleRepository,
        client_repo: ClientRepository,
        cash_repo: CashRepository,
        deceased_repo: DeceasedRepository,
        log_repo: SystemLogRepository,
        backup_repo: BackupRepository,
        system_log: SystemLogService,
        ids: IdGenerator,
        pool: SqlitePool,
    ) -> Self {
        Self {
            inventory_repo,
            sale_repo,
            client_repo,
            cash_repo,
            deceased_repo,
            log_repo,
            backup_repo,
            system_log,
            ids,
            pool,
        }
    }

    // Lê todas as coleções numa mesma conexão
    async fn read_snapshot(&self, conn: &mut SqliteConnection) -> Result<Snapshot, AppError> {
        Ok(Snapshot {
            inventory: self.inventory_repo.get_all_items(&mut *conn).await?,
            sales: self.sale_repo.list(conn).await?,
            clients: self.client_repo.list(&mut *conn).await?,
            cash_movements: self.cash_repo.list_movements(&mut *conn).await?,
            expenses: Some(self.cash_repo.list_expenses(&mut *conn).await?),
            deceased: Some(self.deceased_repo.list(&mut *conn).await?),
            system_logs: Some(self.log_repo.list(&mut *conn).await?),
            metadata: None,
        })
    }

    // =========================================================================
    //  EXPORTAÇÃO
    // =========================================================================

    pub async fn export(&self, user: &User) -> Result<Snapshot, AppError> {
        user.require("opciones:view", "Solo el administrador puede exportar datos")?;

        let mut conn = self.pool.acquire().await?;
        let mut snapshot = self.read_snapshot(&mut conn).await?;
        drop(conn);

        snapshot.metadata = Some(SnapshotMetadata {
            export_date: Utc::now(),
            system_version: SYSTEM_VERSION.to_string(),
            exported_by: user.username.clone(),
        });

        self.system_log
            .log(kinds::DATA_EXPORT, "Exportación de datos completada", &user.username)
            .await;
        Ok(snapshot)
    }

    // =========================================================================
    //  BACKUPS
    // =========================================================================

    async fn store_backup(&self, kind: BackupKind, user: &User) -> Result<i64, AppError> {
        let mut conn = self.pool.acquire().await?;
        let snapshot = self.read_snapshot(&mut conn).await?;

        let backup = Backup {
            id: self.ids.next_id(),
            kind,
            created_at: Utc::now(),
            created_by: user.username.clone(),
            payload: serde_json::to_string(&snapshot)?,
        };
        self.backup_repo.insert(&mut *conn, &backup).await?;

        tracing::info!("💾 Backup {:?} {} criado por {}", kind, backup.id, user.username);
        Ok(backup.id)
    }

    pub async fn list_backups(&self, user: &User) -> Result<Vec<BackupSummary>, AppError> {
        user.require("opciones:view", "No tiene acceso a esta sección")?;
        self.backup_repo.list(&self.pool).await
    }

    pub async fn restore_backup(&self, id: i64, user: &User) -> Result<ImportSummary, AppError> {
        user.require("opciones:edit", "Solo el administrador puede restaurar datos")?;

        let backup = self
            .backup_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Backup no encontrado".into()))?;
        let raw: Value = serde_json::from_str(&backup.payload)?;
        self.import(raw, user).await
    }

    // =========================================================================
    //  IMPORTAÇÃO
    // =========================================================================

    /// Substitui as coleções pelas do arquivo. Antes, guarda um backup do estado atual.
    pub async fn import(&self, raw: Value, user: &User) -> Result<ImportSummary, AppError> {
        user.require("opciones:edit", "Solo el administrador puede importar datos")?;

        let missing = Snapshot::missing_sections(&raw);
        if !missing.is_empty() {
            return Err(AppError::MissingSections(missing));
        }
        let snapshot: Snapshot = serde_json::from_value(raw)
            .map_err(|e| AppError::InvalidInput(format!("Error al importar datos: {e}")))?;

        // O backup fica gravado mesmo se a importação falhar
        let backup_id = self.store_backup(BackupKind::PreImport, user).await?;

        let mut tx = begin_write(&self.pool).await?;
        self.replace_collections(&mut tx, &snapshot).await?;
        tx.commit().await?;

        self.ids.observe(snapshot.max_id());
        self.system_log
            .log(kinds::DATA_IMPORT, "Importación de datos completada", &user.username)
            .await;

        Ok(ImportSummary {
            backup_id,
            inventory: snapshot.inventory.len(),
            sales: snapshot.sales.len(),
            clients: snapshot.clients.len(),
            cash_movements: snapshot.cash_movements.len(),
        })
    }

    async fn replace_collections(
        &self,
        conn: &mut SqliteConnection,
        snapshot: &Snapshot,
    ) -> Result<(), AppError> {
        self.inventory_repo.delete_all(&mut *conn).await?;
        for item in &snapshot.inventory {
            self.inventory_repo.insert_item(&mut *conn, item).await?;
        }

        self.sale_repo.delete_all(conn).await?;
        for sale in &snapshot.sales {
            self.sale_repo.insert(conn, sale).await?;
        }

        self.client_repo.delete_all(&mut *conn).await?;
        for client in &snapshot.clients {
            self.client_repo.insert(&mut *conn, client).await?;
        }

        self.cash_repo.delete_all_movements(&mut *conn).await?;
        for movement in &snapshot.cash_movements {
            self.cash_repo.insert_movement(&mut *conn, movement).await?;
        }

        // Seções opcionais: ausentes ficam como estão
        if let Some(expenses) = &snapshot.expenses {
            self.cash_repo.delete_all_expenses(&mut *conn).await?;
            for expense in expenses {
                self.cash_repo.insert_expense(&mut *conn, expense).await?;
            }
        }
        if let Some(records) = &snapshot.deceased {
            self.deceased_repo.delete_all(&mut *conn).await?;
            for record in records {
                self.deceased_repo.insert(&mut *conn, record).await?;
            }
        }
        if let Some(logs) = &snapshot.system_logs {
            self.log_repo.replace_all(conn, logs).await?;
        }
        Ok(())
    }

    // =========================================================================
    //  LIMPEZA TOTAL
    // =========================================================================

    pub async fn clear_all(&self, confirmation: &str, user: &User) -> Result<i64, AppError> {
        user.require("admin", "Solo el administrador puede limpiar todos los datos")?;
        if confirmation != CLEAR_CONFIRMATION {
            return Err(AppError::ConfirmationRequired);
        }

        let backup_id = self.store_backup(BackupKind::PreClear, user).await?;

        let empty = Snapshot {
            inventory: vec![],
            sales: vec![],
            clients: vec![],
            cash_movements: vec![],
            expenses: Some(vec![]),
            deceased: Some(vec![]),
            system_logs: Some(vec![]),
            metadata: None,
        };
        let mut tx = begin_write(&self.pool).await?;
        self.replace_collections(&mut tx, &empty).await?;
        tx.commit().await?;

        tracing::warn!("🧹 Todos os dados foram apagados por {}", user.username);
        self.system_log
            .log(kinds::DATA_CLEAR, "Limpieza total de datos realizada", &user.username)
            .await;
        Ok(backup_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::db_utils::test_pool,
        models::{auth::Role, client::Client, inventory::InventoryItem},
    };
    use rust_decimal::Decimal;
    use serde_json::json;

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

    fn service(pool: &SqlitePool, ids: &IdGenerator) -> BackupService {
        BackupService::new(
            InventoryRepository::new(pool.clone()),
            SaleRepository::new(),
            ClientRepository::new(),
            CashRepository::new(),
            DeceasedRepository::new(),
            SystemLogRepository::new(),
            BackupRepository::new(),
            SystemLogService::new(SystemLogRepository::new(), ids.clone(), pool.clone()),
            ids.clone(),
            pool.clone(),
        )
    }

    async fn seed(pool: &SqlitePool, ids: &IdGenerator) {
        let item = InventoryItem {
            id: ids.next_id(),
            item_type: "silla".into(),
            name: "Silla plegable".into(),
            quantity: 40,
            price: Decimal::from(15),
            status: "disponible".into(),
            created_by: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
        };
        InventoryRepository::new(pool.clone())
            .insert_item(pool, &item)
            .await
            .unwrap();

        let client = Client {
            id: ids.next_id(),
            name: "Pedro Almonte".into(),
            document_id: "002".into(),
            phone: "829".into(),
            address: "Av. Duarte".into(),
            email: None,
            created_by: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
        };
        ClientRepository::new().insert(pool, &client).await.unwrap();
    }

    #[tokio::test]
    async fn export_then_import_restores_the_same_data() {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let service = service(&pool, &ids);
        let admin = user("admin", Role::Admin);
        seed(&pool, &ids).await;

        let exported = service.export(&admin).await.unwrap();
        assert_eq!(exported.metadata.as_ref().unwrap().exported_by, "admin");
        let raw = serde_json::to_value(&exported).unwrap();

        // Apaga tudo e importa o arquivo de volta
        service.clear_all("CONFIRMAR", &admin).await.unwrap();
        let empty = service.export(&admin).await.unwrap();
        assert!(empty.inventory.is_empty() && empty.clients.is_empty());

        let summary = service.import(raw, &admin).await.unwrap();
        assert_eq!(summary.inventory, 1);
        assert_eq!(summary.clients, 1);

        let restored = service.export(&admin).await.unwrap();
        assert_eq!(restored.inventory[0].name, "Silla plegable");
        assert_eq!(restored.inventory[0].quantity, 40);
        assert_eq!(restored.clients[0].name, "Pedro Almonte");

        // Novos IDs continuam acima dos importados
        assert!(ids.next_id() > exported.max_id());

        // Os dois backups automáticos ficaram guardados
        let backups = service.list_backups(&admin).await.unwrap();
        assert_eq!(backups.len(), 2);
    }

    #[tokio::test]
    async fn import_accepts_files_from_the_browser_version() {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let service = service(&pool, &ids);
        let admin = user("admin", Role::Admin);

        // Cliente gravado como texto e venda sem os campos de pagamento
        let raw = json!({
            "inventory": [{
                "id": 1699999990000i64, "type": "silla", "name": "Silla", "quantity": 20,
                "price": 10, "status": "disponible", "createdBy": "admin",
                "createdAt": "2024-11-14T20:00:00.000Z"
            }],
            "clients": [{
                "id": 1699999999999i64, "name": "Rosa Peña", "documentId": "004",
                "phone": "809", "address": "Calle 8", "email": "", "createdBy": "admin",
                "createdAt": "2024-11-14T21:00:00.000Z"
            }],
            "sales": [{
                "id": 1700000000001i64, "clientId": "1699999999999", "status": "completado",
                "paymentMethod": "efectivo", "total": 20, "notes": "",
                "items": [{"name": "Silla", "quantity": 2, "price": 10, "subtotal": 20}],
                "date": "2024-11-14T22:13:20.000Z", "createdBy": "cajero1"
            }],
            "cashMovements": []
        });

        let summary = service.import(raw, &admin).await.unwrap();
        assert_eq!(summary.sales, 1);

        let snapshot = service.export(&admin).await.unwrap();
        let sale = &snapshot.sales[0];
        assert_eq!(sale.client_id, snapshot.clients[0].id);
        assert_eq!(sale.amount_paid, Decimal::ZERO);
        assert_eq!(sale.items.len(), 1);
    }

    #[tokio::test]
    async fn import_without_required_sections_changes_nothing() {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let service = service(&pool, &ids);
        let admin = user("admin", Role::Admin);
        seed(&pool, &ids).await;

        let err = service
            .import(json!({"inventory": [], "clients": []}), &admin)
            .await
            .unwrap_err();
        match err {
            AppError::MissingSections(missing) => {
                assert_eq!(missing, vec!["sales".to_string(), "cashMovements".to_string()])
            }
            other => panic!("erro inesperado: {other:?}"),
        }

        let snapshot = service.export(&admin).await.unwrap();
        assert_eq!(snapshot.inventory.len(), 1);
        assert!(service.list_backups(&admin).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_requires_admin_and_exact_confirmation() {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let service = service(&pool, &ids);
        let admin = user("admin", Role::Admin);
        let cashier = user("cajero1", Role::Cajero);
        seed(&pool, &ids).await;

        assert!(matches!(
            service.clear_all("CONFIRMAR", &cashier).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.clear_all("confirmar", &admin).await,
            Err(AppError::ConfirmationRequired)
        ));
        assert_eq!(service.export(&admin).await.unwrap().inventory.len(), 1);

        let backup_id = service.clear_all("CONFIRMAR", &admin).await.unwrap();
        let snapshot = service.export(&admin).await.unwrap();
        assert!(snapshot.inventory.is_empty());

        // Só sobra o registro da limpeza (e o da exportação acima)
        let logs = snapshot.system_logs.unwrap();
        assert!(logs.iter().any(|l| l.log_type == kinds::DATA_CLEAR));

        // O backup anterior à limpeza devolve os dados
        let summary = service.restore_backup(backup_id, &admin).await.unwrap();
        assert_eq!(summary.inventory, 1);
        assert_eq!(service.export(&admin).await.unwrap().clients.len(), 1);
    }
}
