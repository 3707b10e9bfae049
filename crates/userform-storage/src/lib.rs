// Postgres storage layer with sqlx
//
// This crate provides database implementations for core traits:
// - PgUserStore: implements UserStore for the users table

pub mod config;
pub mod repositories;
pub mod user_store;

pub use config::DatabaseConfig;
pub use repositories::Database;
pub use user_store::PgUserStore;
