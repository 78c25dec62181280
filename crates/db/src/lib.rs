//! SQLite persistence for the board: pool setup, embedded migrations,
//! row models and repositories.

pub mod models;
pub mod repositories;

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;

/// Path value selecting a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Normalize a configured database path.
///
/// `:memory:` passes through untouched; a path without an extension gets
/// `.db` appended so `DB_PATH=wos` and `DB_PATH=wos.db` name the same file.
pub fn normalize_db_path(path: &str) -> String {
    if path == MEMORY_PATH || Path::new(path).extension().is_some() {
        path.to_string()
    } else {
        format!("{path}.db")
    }
}

/// Create a connection pool for the database at `path`, creating the file
/// if it does not exist.
///
/// An in-memory database lives only as long as its connection, so its pool
/// is pinned to a single connection that is never recycled.
pub async fn create_pool(path: &str) -> Result<DbPool, sqlx::Error> {
    let path = normalize_db_path(path);

    if path == MEMORY_PATH {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    tracing::debug!(path = %path, "Opening SQLite database");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
