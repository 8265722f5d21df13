//! Cart repository for database operations.
//!
//! One row per (account, product). Adding a product already in the cart
//! merges quantities in SQL so concurrent adds cannot lose updates.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoplane_core::{CartLine, ProductRef, UserId};

use super::{RepositoryError, parse_decimal, parse_quantity, touch_account};

#[derive(sqlx::FromRow)]
struct CartRow {
    product_ref: String,
    name: String,
    unit_price: String,
    quantity: i64,
    added_at: DateTime<Utc>,
}

impl CartRow {
    fn into_domain(self) -> Result<CartLine, RepositoryError> {
        Ok(CartLine {
            product_ref: ProductRef::new(self.product_ref),
            name: self.name,
            unit_price: parse_decimal(&self.unit_price, "unit_price")?,
            quantity: parse_quantity(self.quantity, "quantity")?,
            added_at: self.added_at,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the cart lines for an account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn items(&self, account_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartRow>(
            r"
            SELECT product_ref, name, unit_price, quantity, added_at
            FROM cart_item
            WHERE account_id = ?1
            ORDER BY added_at, product_ref
            ",
        )
        .bind(account_id.as_uuid().to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartRow::into_domain).collect()
    }

    /// Add a line to the cart, merging quantities if the product is
    /// already present. The stored name and price are refreshed on merge,
    /// and the owning account's `updated_at` is bumped in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn add(&self, account_id: UserId, line: &CartLine) -> Result<(), RepositoryError> {
        let account_key = account_id.as_uuid().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO cart_item (account_id, product_ref, name, unit_price,
                                   quantity, added_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(account_id, product_ref) DO UPDATE SET
                quantity = quantity + excluded.quantity,
                name = excluded.name,
                unit_price = excluded.unit_price
            ",
        )
        .bind(&account_key)
        .bind(line.product_ref.as_str())
        .bind(&line.name)
        .bind(line.unit_price.to_string())
        .bind(i64::from(line.quantity))
        .bind(line.added_at)
        .execute(&mut *tx)
        .await?;

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Set the quantity of an existing cart line and bump the account's
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not in the
    /// cart, `RepositoryError::Database` on other failures.
    pub async fn update_quantity(
        &self,
        account_id: UserId,
        product_ref: &ProductRef,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let account_key = account_id.as_uuid().to_string();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE cart_item SET quantity = ?3
            WHERE account_id = ?1 AND product_ref = ?2
            ",
        )
        .bind(&account_key)
        .bind(product_ref.as_str())
        .bind(i64::from(quantity))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Remove a product from the cart and bump the account's
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

        sqlx::query("DELETE FROM cart_item WHERE account_id = ?1 AND product_ref = ?2")
            .bind(&account_key)
            .bind(product_ref.as_str())
            .execute(&mut *tx)
            .await?;

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }
}
