#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

/// A fresh, migrated database per test.
///
/// Defaults to in-memory SQLite, which keeps each test isolated; set
/// `TEST_DATABASE_URL` to run against a shared Postgres instead.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let mut cfg = DatabaseConfig { url, ..Default::default() };
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = 10;
    connect_and_migrate(&cfg).await
}

/// Register a throwaway user directly through the entity layer.
pub async fn make_user(db: &DatabaseConnection, name: &str) -> Result<models::user::Model, anyhow::Error> {
    let email = format!("{}_{}@example.com", name.to_lowercase(), uuid::Uuid::new_v4());
    Ok(models::user::create(db, &email, name, models::user::DEFAULT_ROLE).await?)
}
