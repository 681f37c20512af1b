//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::info;

/// File a `sqlite:` URL points at; `None` for in-memory or non-SQLite URLs.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the directory holding a SQLite database file exists.
pub async fn ensure_database_dir(url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(url) else {
        return Ok(());
    };
    let Some(dir) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    ensure_dir(dir).await
}

async fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(dir).await.is_err() {
        info!(dir = %dir.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}
