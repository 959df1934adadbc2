// src/handlers.rs

pub mod actions;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod data;
pub mod deceased;
pub mod finance;
pub mod inventory;
pub mod preferences;
pub mod reports;
pub mod sales;
pub mod system;
