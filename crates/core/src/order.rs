//! Order references and totals.
//!
//! Orders are not standalone entities: placing one drains the cart into
//! purchase-history records tagged with a generated reference. The
//! reference format (`ORDER_<millisecond timestamp>`) is part of the
//! external contract and must not change.

use rust_decimal::Decimal;

use crate::line_item::CartLine;
use crate::pricing;
use crate::types::OrderRef;

/// Build the order reference for a placement at `timestamp_ms`
/// (milliseconds since the Unix epoch).
#[must_use]
pub fn order_reference(timestamp_ms: i64) -> OrderRef {
    OrderRef::new(format!("ORDER_{timestamp_ms}"))
}

/// The order total captured at placement: `Σ unit_price × quantity`.
///
/// Tax and shipping are display-side computations and are not folded into
/// the persisted total.
#[must_use]
pub fn order_total(lines: &[CartLine]) -> Decimal {
    pricing::subtotal(lines)
}
