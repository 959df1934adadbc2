// src/config.rs

use std::{env, str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    common::db_utils::IdGenerator,
    db::{
        BackupRepository, CashRepository, ClientRepository, DeceasedRepository,
        InventoryRepository, PreferencesRepository, SaleRepository, SystemLogRepository,
        UserRepository,
    },
    models::inventory::LOW_STOCK_THRESHOLD,
    services::{
        auth::AuthService, backup_service::BackupService, client_service::ClientService,
        dashboard_service::DashboardService, deceased_service::DeceasedService,
        finance_service::FinanceService, inventory_service::InventoryService,
        maintenance_service::MaintenanceService, preferences_service::PreferencesService,
        report_service::ReportService, sale_service::SaleService,
        system_log_service::SystemLogService,
    },
};

// ---
// Configuração lida do ambiente (.env)
// ---
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_connect_retries: u32,
    pub low_stock_threshold: i64,
    pub maintenance_interval_hours: u64,
    pub bcrypt_cost: u32,
}

fn env_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Valor inválido para {key}: '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://funeraria.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            db_connect_retries: env_or("DB_CONNECT_RETRIES", 3)?,
            low_stock_threshold: env_or("LOW_STOCK_THRESHOLD", LOW_STOCK_THRESHOLD)?,
            maintenance_interval_hours: env_or("MAINTENANCE_INTERVAL_HOURS", 24)?,
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

/// Abre o pool, tentando de novo algumas vezes (1 s entre as tentativas).
pub async fn connect_with_retry(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // Leitores não bloqueiam o escritor; escritores esperam o lock
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let attempts = config.db_connect_retries.max(1);
    let mut attempt = 1;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < attempts => {
                tracing::warn!("Tentativa {}/{} de conexão falhou: {:?}", attempt, attempts, e);
                attempt += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                return Err(e.into());
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Config,

    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub client_service: ClientService,
    pub deceased_service: DeceasedService,
    pub finance_service: FinanceService,
    pub sale_service: SaleService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub backup_service: BackupService,
    pub maintenance_service: MaintenanceService,
    pub system_log_service: SystemLogService,
    pub preferences_service: PreferencesService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = connect_with_retry(&config).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        let state = Self::from_pool(db_pool, config);
        let seeded = state.auth_service.seed_default_users().await?;
        if seeded > 0 {
            tracing::info!("👤 {} usuários padrão criados", seeded);
        }
        Ok(state)
    }

    /// Monta o gráfico de dependências sobre um pool já migrado.
    pub fn from_pool(db_pool: SqlitePool, config: Config) -> Self {
        let ids = IdGenerator::new();
        let pool = &db_pool;

        // --- Repositórios ---
        let user_repo = UserRepository::new(pool.clone());
        let preferences_repo = PreferencesRepository::new(pool.clone());
        let inventory_repo = InventoryRepository::new(pool.clone());
        let client_repo = ClientRepository::new();
        let sale_repo = SaleRepository::new();
        let cash_repo = CashRepository::new();
        let deceased_repo = DeceasedRepository::new();
        let log_repo = SystemLogRepository::new();
        let backup_repo = BackupRepository::new();

        // --- Serviços ---
        let system_log_service = SystemLogService::new(log_repo.clone(), ids.clone(), pool.clone());
        let auth_service = AuthService::new(
            user_repo,
            config.jwt_secret.clone(),
            config.bcrypt_cost,
            ids.clone(),
            pool.clone(),
        );
        let inventory_service =
            InventoryService::new(inventory_repo.clone(), ids.clone(), pool.clone());
        let client_service = ClientService::new(client_repo.clone(), ids.clone(), pool.clone());
        let deceased_service =
            DeceasedService::new(deceased_repo.clone(), ids.clone(), pool.clone());
        let finance_service = FinanceService::new(cash_repo.clone(), ids.clone(), pool.clone());
        let sale_service = SaleService::new(
            sale_repo.clone(),
            inventory_repo.clone(),
            client_repo.clone(),
            cash_repo.clone(),
            ids.clone(),
            config.low_stock_threshold,
            pool.clone(),
        );
        let report_service = ReportService::new(
            sale_repo.clone(),
            client_repo.clone(),
            cash_repo.clone(),
            deceased_repo.clone(),
            pool.clone(),
        );
        let dashboard_service = DashboardService::new(
            sale_repo.clone(),
            cash_repo.clone(),
            client_repo.clone(),
            inventory_repo.clone(),
            pool.clone(),
        );
        let backup_service = BackupService::new(
            inventory_repo.clone(),
            sale_repo.clone(),
            client_repo,
            cash_repo,
            deceased_repo,
            log_repo,
            backup_repo,
            system_log_service.clone(),
            ids,
            pool.clone(),
        );
        let maintenance_service = MaintenanceService::new(
            sale_repo,
            inventory_repo,
            system_log_service.clone(),
            config.low_stock_threshold,
            pool.clone(),
        );
        let preferences_service = PreferencesService::new(preferences_repo);

        Self {
            db_pool,
            config,
            auth_service,
            inventory_service,
            client_service,
            deceased_service,
            finance_service,
            sale_service,
            report_service,
            dashboard_service,
            backup_service,
            maintenance_service,
            system_log_service,
            preferences_service,
        }
    }
}
