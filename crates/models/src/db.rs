use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Open a pooled connection from the `[database]` config section.
///
/// The config is validated first, so in-memory SQLite is refused here: pool
/// recycling would silently swap in a fresh, empty database.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    cfg.validate()?;
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Open a connection by URL only; `:memory:` URLs get a single pooled
/// connection so every query sees the same database.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(url.to_owned());
    pin_memory_database(&mut opts);
    let db = Database::connect(opts).await?;
    Ok(db)
}

// every pooled connection to `:memory:` would open its own empty database
fn pin_memory_database(opts: &mut ConnectOptions) {
    if opts.get_url().contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    }
}
