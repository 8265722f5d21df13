//! Line items for carts, wishlists, and purchase history.
//!
//! Each variant is a snapshot: the name and unit price are captured when
//! the item is added so later catalog edits do not rewrite history. The
//! at-most-once-per-collection invariant on `product_ref` is enforced by
//! the persistence layer, not here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderRef, ProductRef};

/// A line in an account's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product reference; unique within one cart.
    pub product_ref: ProductRef,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Quantity; repeated adds accumulate here.
    pub quantity: u32,
    /// When the line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// `unit_price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An entry in an account's wishlist. No quantity: wishes are idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// Product reference; unique within one wishlist.
    pub product_ref: ProductRef,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// When the entry was added.
    pub added_at: DateTime<Utc>,
}

/// An append-only purchase-history record produced by order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Order the purchase belongs to.
    pub order_ref: OrderRef,
    /// Product reference.
    pub product_ref: ProductRef,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub unit_price: Decimal,
    /// Quantity purchased.
    pub quantity: u32,
    /// Purchase timestamp stamped at order placement.
    pub purchased_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product_ref: ProductRef::new("sku-1"),
            name: "Mug".to_owned(),
            unit_price: "2.50".parse().unwrap(),
            quantity: 3,
            added_at: Utc::now(),
        };
        assert_eq!(line.line_total(), "7.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_cart_line_wire_format() {
        let line = CartLine {
            product_ref: ProductRef::new("sku-1"),
            name: "Mug".to_owned(),
            unit_price: "2.50".parse().unwrap(),
            quantity: 1,
            added_at: Utc::now(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productRef"], "sku-1");
        assert_eq!(json["unitPrice"], "2.50");
        assert_eq!(json["quantity"], 1);
    }
}
