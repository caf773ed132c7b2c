use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};


/// CRUD operations tests for all models
pub mod crud_tests;


/// Fresh migrated database; in-memory SQLite unless `TEST_DATABASE_URL` is set.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let cfg = DatabaseConfig { url, ..Default::default() };
    connect_and_migrate(&cfg).await
}

pub(crate) fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", uuid::Uuid::new_v4())
}
