pub mod action;
pub mod auth;
pub mod backup;
pub mod cash;
pub mod client;
pub mod dashboard;
pub mod deceased;
pub mod inventory;
pub mod notice;
pub mod report;
pub mod sale;
pub mod settings;
pub mod system_log;
