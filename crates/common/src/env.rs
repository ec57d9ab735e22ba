//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the SPA bundle directory is missing; static routes will 404.
pub async fn ensure_frontend(frontend_dir: &str) -> bool {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
        return false;
    }
    true
}

/// Create the parent directory of a file-backed SQLite url (`sqlite://data/clinic.db?mode=rwc`).
pub async fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite:") else { return Ok(()) };
    let path = rest.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or_default();
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
    async fn postgres_urls_are_ignored() {
        assert!(ensure_sqlite_dir("postgres://localhost/clinic").await.is_ok());
    }

    #[tokio::test]
    async fn in_memory_sqlite_needs_no_directory() {
        assert!(ensure_sqlite_dir("sqlite::memory:").await.is_ok());
    }

    #[tokio::test]
    async fn missing_frontend_is_reported() {
        assert!(!ensure_frontend("/definitely/not/a/frontend/dir").await);
    }
}
