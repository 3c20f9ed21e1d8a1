//! Database module for PitchDesk.
//!
//! This module provides SQLite connectivity through sqlx and migration
//! management via an embedded migration list.

mod schema;

pub use schema::MIGRATIONS;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::Result;

/// Open a database pool at the specified path.
///
/// If the database file doesn't exist, it will be created.
/// Migrations are automatically applied.
pub async fn open(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let path = path.as_ref();
    info!("Opening database at {:?}", path);

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))
        .map_err(sqlx::Error::from)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Open an in-memory database pool for testing.
///
/// The pool is capped at a single connection so every query sees the
/// same in-memory database.
pub async fn open_in_memory() -> Result<SqlitePool> {
    debug!("Opening in-memory database");
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(sqlx::Error::from)?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Get the current schema version.
pub async fn schema_version(pool: &SqlitePool) -> Result<i64> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

/// Apply pending migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let current_version = schema_version(pool).await?;
    let migrations = MIGRATIONS;

    if current_version as usize >= migrations.len() {
        debug!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Migrating database from version {} to {}",
        current_version,
        migrations.len()
    );

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await?;

    for (i, migration) in migrations.iter().enumerate().skip(current_version as usize) {
        let version = (i + 1) as i64;
        info!("Applying migration v{}", version);

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Migration v{} applied successfully", version);
    }

    info!(
        "Database migration complete (now at version {})",
        migrations.len()
    );
    Ok(())
}

/// Check if a table exists.
pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let pool = open_in_memory().await.unwrap();
        assert!(schema_version(&pool).await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_migrations_applied() {
        let pool = open_in_memory().await.unwrap();
        let version = schema_version(&pool).await.unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_core_tables_exist() {
        let pool = open_in_memory().await.unwrap();
        assert!(table_exists(&pool, "professional_users").await.unwrap());
        assert!(table_exists(&pool, "users").await.unwrap());
        assert!(table_exists(&pool, "player_registrations").await.unwrap());
        assert!(table_exists(&pool, "messages").await.unwrap());
        assert!(table_exists(&pool, "notifications").await.unwrap());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = open_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        let version = schema_version(&pool).await.unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        {
            let pool = open(&db_path).await.unwrap();
            assert!(table_exists(&pool, "messages").await.unwrap());
            pool.close().await;
        }

        // Reopen: migrations should not be reapplied
        {
            let pool = open(&db_path).await.unwrap();
            assert_eq!(
                schema_version(&pool).await.unwrap() as usize,
                MIGRATIONS.len()
            );
            pool.close().await;
        }
    }
}
