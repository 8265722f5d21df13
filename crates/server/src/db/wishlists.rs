//! Wishlist repository for database operations.
//!
//! A wishlist is a set: adding a product twice keeps a single entry.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoplane_core::{ProductRef, UserId, WishlistEntry};

use super::{RepositoryError, parse_decimal, touch_account};

#[derive(sqlx::FromRow)]
struct WishlistRow {
    product_ref: String,
    name: String,
    unit_price: String,
    added_at: DateTime<Utc>,
}

impl WishlistRow {
    fn into_domain(self) -> Result<WishlistEntry, RepositoryError> {
        Ok(WishlistEntry {
            product_ref: ProductRef::new(self.product_ref),
            name: self.name,
            unit_price: parse_decimal(&self.unit_price, "unit_price")?,
            added_at: self.added_at,
        })
    }
}

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the wishlist entries for an account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn entries(
        &self,
        account_id: UserId,
    ) -> Result<Vec<WishlistEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, WishlistRow>(
            r"
            SELECT product_ref, name, unit_price, added_at
            FROM wishlist_item
            WHERE account_id = ?1
            ORDER BY added_at, product_ref
            ",
        )
        .bind(account_id.as_uuid().to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(WishlistRow::into_domain).collect()
    }

    /// Add an entry and bump the account's `updated_at`. Adding a product
    /// already on the wishlist is a no-op that keeps the original entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn add(
        &self,
        account_id: UserId,
        entry: &WishlistEntry,
    ) -> Result<(), RepositoryError> {
        let account_key = account_id.as_uuid().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT OR IGNORE INTO wishlist_item (account_id, product_ref, name,
                                                 unit_price, added_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&account_key)
        .bind(entry.product_ref.as_str())
        .bind(&entry.name)
        .bind(entry.unit_price.to_string())
        .bind(entry.added_at)
        .execute(&mut *tx)
        .await?;

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Remove a product from the wishlist and bump the account's
    /// `updated_at`. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn remove(
        &self,
        account_id: UserId,
        product_ref: &ProductRef,
    ) -> Result<(), RepositoryError> {
        let account_key = account_id.as_uuid().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM wishlist_item WHERE account_id = ?1 AND product_ref = ?2")
            .bind(&account_key)
            .bind(product_ref.as_str())
            .execute(&mut *tx)
            .await?;

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }
}
