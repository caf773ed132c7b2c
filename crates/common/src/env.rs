//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the static frontend directory is missing; the API still works.
pub async fn ensure_frontend(frontend_dir: &str) -> bool {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static pages will 404");
        return false;
    }
    true
}

/// Create the parent directory of a file-backed SQLite database if needed.
pub async fn ensure_sqlite_parent(url: &str) -> anyhow::Result<()> {
    let Some(rest) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_and_postgres_urls_are_ignored() {
        ensure_sqlite_parent("sqlite::memory:").await.unwrap();
        ensure_sqlite_parent("postgres://u@h/db").await.unwrap();
    }

    #[tokio::test]
    async fn missing_frontend_is_reported() {
        assert!(!ensure_frontend("/definitely/not/here").await);
    }
}
