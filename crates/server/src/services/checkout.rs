//! Checkout service.
//!
//! Turns the current cart into an order: snapshots each line into the
//! purchase history, drains the cart, and returns a receipt.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;

use shoplane_core::{OrderRef, PurchaseRecord, UserId, order};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;

/// Errors from checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Cannot place an order with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result of a successfully placed order.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Generated order reference.
    pub order_ref: OrderRef,
    /// Sum of line totals at the time of purchase.
    pub total: Decimal,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    carts: CartRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order from the account's current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines,
    /// `CheckoutError::Repository` on database failure.
    pub async fn place_order(&self, account_id: UserId) -> Result<Receipt, CheckoutError> {
        let lines = self.carts.items(account_id).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let now = Utc::now();
        let order_ref = order::order_reference(now.timestamp_millis());
        let total = order::order_total(&lines);

        let records: Vec<PurchaseRecord> = lines
            .into_iter()
            .map(|line| PurchaseRecord {
                order_ref: order_ref.clone(),
                product_ref: line.product_ref,
                name: line.name,
                unit_price: line.unit_price,
                quantity: line.quantity,
                purchased_at: now,
            })
            .collect();

        self.orders.place(account_id, &records).await?;

        Ok(Receipt { order_ref, total })
    }
}
