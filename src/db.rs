pub mod user_repo;
pub use user_repo::UserRepository;
pub mod preferences_repo;
pub use preferences_repo::PreferencesRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod cash_repo;
pub use cash_repo::CashRepository;
pub mod deceased_repo;
pub use deceased_repo::DeceasedRepository;
pub mod system_log_repo;
pub use system_log_repo::SystemLogRepository;
pub mod backup_repo;
pub use backup_repo::BackupRepository;
