// src/services.rs

pub mod auth;
pub mod backup_service;
pub mod client_service;
pub mod dashboard_service;
pub mod deceased_service;
pub mod finance_service;
pub mod inventory_service;
pub mod maintenance_service;
pub mod preferences_service;
pub mod report_service;
pub mod sale_service;
pub mod system_log_service;
