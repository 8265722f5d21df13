//! Database operations for the Shoplane `SQLite` store.
//!
//! # Tables
//!
//! - `tenant` - storefront documents (metadata, catalog JSON, screen JSON)
//! - `account` - end users, unique on (`tenant_id`, `email`)
//! - `cart_item` / `wishlist_item` - one row per (account, product)
//! - `purchase` - append-only purchase history
//!
//! Queries use the sqlx runtime API with explicit row structs; rows are
//! converted into domain types at the repository boundary so corrupt data
//! surfaces as [`RepositoryError::DataCorruption`] instead of leaking
//! raw strings into handlers.

pub mod accounts;
pub mod carts;
pub mod orders;
pub mod tenants;
pub mod wishlists;

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use thiserror::Error;

/// Embedded migrations from the `migrations/` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// WAL journaling keeps readers from blocking the single writer; the
/// database file is created on first connect.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create an isolated in-memory pool with the schema applied (for tests
/// and local experiments).
///
/// In-memory `SQLite` lives and dies with its connection, so the pool is
/// capped at a single connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if the pool or migrations fail.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    Ok(pool)
}

/// Run all pending migrations. Idempotent.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Bump the owning account's `updated_at`. Every cart, wishlist and
/// order mutation runs this inside its own transaction: the account
/// timestamp tracks the last change to any of its collections.
pub(crate) async fn touch_account(
    conn: &mut sqlx::SqliteConnection,
    account_key: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE account SET updated_at = ?2 WHERE id = ?1")
        .bind(account_key)
        .bind(chrono::Utc::now())
        .execute(conn)
        .await?;
    Ok(())
}

/// Parse a TEXT-stored decimal column.
pub(crate) fn parse_decimal(raw: &str, column: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid decimal in {column}: {e}"))
    })
}

/// Convert an INTEGER-stored quantity column.
pub(crate) fn parse_quantity(raw: i64, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(raw).map_err(|_| {
        RepositoryError::DataCorruption(format!("negative or oversized quantity in {column}"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_applies_schema() {
        let pool = create_in_memory_pool().await.unwrap();
        // Schema is queryable immediately
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenant")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, 0);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("12.50", "unit_price").is_ok());
        assert!(matches!(
            parse_decimal("not-a-number", "unit_price"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_parse_quantity_rejects_negative() {
        assert_eq!(parse_quantity(3, "quantity").unwrap(), 3);
        assert!(matches!(
            parse_quantity(-1, "quantity"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
