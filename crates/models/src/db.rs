use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub use configs::DatabaseConfig;

pub fn is_memory_sqlite(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("sqlite:") && (lower.contains(":memory:") || lower.contains("mode=memory"))
}

/// Idle and lifetime limit for the in-memory SQLite connection. Recycling that
/// connection would drop the database, so the limits sit far beyond any
/// process lifetime.
pub const MEMORY_POOL_KEEPALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Build pool options from configuration.
///
/// An in-memory SQLite database lives inside a single connection, so the pool
/// is pinned to exactly one connection that is never reaped.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_memory_sqlite(&cfg.url) {
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_POOL_KEEPALIVE)
            .max_lifetime(MEMORY_POOL_KEEPALIVE);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opt
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    Ok(db)
}

/// Apply all pending migrations (schema, deletion trigger, default catalog).
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    use migration::MigratorTrait;
    migration::Migrator::up(db, None).await?;
    tracing::info!(event = "migrations_applied", "database schema is up to date");
    Ok(())
}

/// Connect and migrate in one step.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
