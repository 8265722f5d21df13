//! Purchase history repository for database operations.
//!
//! Placing an order appends one purchase row per cart line and drains
//! the cart in the same transaction, so a crash can never leave an order
//! recorded with its cart intact (or vice versa).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoplane_core::{OrderRef, ProductRef, PurchaseRecord, UserId};

use super::{RepositoryError, parse_decimal, parse_quantity, touch_account};

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    order_ref: String,
    product_ref: String,
    name: String,
    unit_price: String,
    quantity: i64,
    purchased_at: DateTime<Utc>,
}

impl PurchaseRow {
    fn into_domain(self) -> Result<PurchaseRecord, RepositoryError> {
        Ok(PurchaseRecord {
            order_ref: OrderRef::new(self.order_ref),
            product_ref: ProductRef::new(self.product_ref),
            name: self.name,
            unit_price: parse_decimal(&self.unit_price, "unit_price")?,
            quantity: parse_quantity(self.quantity, "quantity")?,
            purchased_at: self.purchased_at,
        })
    }
}

/// Repository for purchase history operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the purchase history for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored values fail to parse.
    pub async fn history(
        &self,
        account_id: UserId,
    ) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r"
            SELECT order_ref, product_ref, name, unit_price, quantity, purchased_at
            FROM purchase
            WHERE account_id = ?1
            ORDER BY purchased_at DESC, id DESC
            ",
        )
        .bind(account_id.as_uuid().to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PurchaseRow::into_domain).collect()
    }

    /// Record an order: append purchase rows for the given records and
    /// drain the account's cart, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement in the
    /// transaction fails.
    pub async fn place(
        &self,
        account_id: UserId,
        records: &[PurchaseRecord],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let account_key = account_id.as_uuid().to_string();

        for record in records {
            sqlx::query(
                r"
                INSERT INTO purchase (account_id, order_ref, product_ref, name,
                                      unit_price, quantity, purchased_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(&account_key)
            .bind(record.order_ref.as_str())
            .bind(record.product_ref.as_str())
            .bind(&record.name)
            .bind(record.unit_price.to_string())
            .bind(i64::from(record.quantity))
            .bind(record.purchased_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_item WHERE account_id = ?1")
            .bind(&account_key)
            .execute(&mut *tx)
            .await?;

        touch_account(&mut *tx, &account_key).await?;

        tx.commit().await?;
        Ok(())
    }
}
