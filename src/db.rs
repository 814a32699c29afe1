use std::{fs, path::Path, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::StorageResult;

const MAX_CONNECTIONS: u32 = 5;

/// Opens the pool, creating the database file and its directory if needed,
/// and applies pending migrations.
pub async fn connect(db_url: &str) -> StorageResult<SqlitePool> {
    ensure_sqlite_dir(db_url)?;

    let connect_options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

    // An in-memory database lives and dies with its connection, so the pool
    // must hold exactly one and never recycle it.
    let pool_options = if is_memory_url(db_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options.connect_with(connect_options).await?;
    run_migrations(&pool).await?;
    log::info!("Database ready at {db_url}");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let Some(path) = sqlite_path(db_url) else {
        return Ok(());
    };
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn is_memory_url(db_url: &str) -> bool {
    sqlite_path(db_url) == Some(":memory:") || db_url.contains("mode=memory")
}

fn sqlite_path(db_url: &str) -> Option<&str> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    Some(path.split('?').next().unwrap_or(path))
}
