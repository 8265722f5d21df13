//! Subtotal, tax, and shipping arithmetic.
//!
//! All arithmetic uses `Decimal`; nothing here rounds. Display rounding is
//! the client's concern.
//!
//! Two tax surfaces exist side by side: [`gst`] (18%) and [`general_tax`]
//! (8%). They are independent display paths: one backs the "GST final
//! total" figure, the other the generic "total with tax" figure. They are
//! never composed; see DESIGN.md before merging them.

use rust_decimal::Decimal;

use crate::line_item::CartLine;

/// GST display rate, percent.
pub const GST_RATE_PERCENT: u32 = 18;

/// General tax display rate, percent.
pub const GENERAL_TAX_RATE_PERCENT: u32 = 8;

/// Sum of `unit_price × quantity` across lines.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Tax on an amount at a given percent rate: `amount × rate / 100`.
#[must_use]
pub fn tax(amount: Decimal, rate_percent: u32) -> Decimal {
    amount * Decimal::from(rate_percent) / Decimal::from(100_u32)
}

/// GST at the fixed 18% display rate.
#[must_use]
pub fn gst(subtotal: Decimal) -> Decimal {
    tax(subtotal, GST_RATE_PERCENT)
}

/// General tax at the fixed 8% display rate.
#[must_use]
pub fn general_tax(subtotal: Decimal) -> Decimal {
    tax(subtotal, GENERAL_TAX_RATE_PERCENT)
}

/// Apply the flat shipping fee unless the amount qualifies for free
/// shipping: amounts at or above `free_threshold` ship free.
#[must_use]
pub fn total_with_shipping(amount: Decimal, free_threshold: Decimal, flat_fee: Decimal) -> Decimal {
    if amount >= free_threshold {
        amount
    } else {
        amount + flat_fee
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use crate::types::ProductRef;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_ref: ProductRef::new(format!("sku-{price}-{quantity}")),
            name: "item".to_owned(),
            unit_price: dec(price),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_subtotal_empty_cart_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_reference_cart_totals() {
        // cart = [{price:10, qty:2}, {price:5, qty:1}]
        let lines = vec![line("10", 2), line("5", 1)];

        let sub = subtotal(&lines);
        assert_eq!(sub, dec("25"));
        assert_eq!(gst(sub), dec("4.5"));
        assert_eq!(sub + gst(sub), dec("29.5"));
    }

    #[test]
    fn test_general_tax_is_a_separate_path() {
        let sub = dec("100");
        assert_eq!(general_tax(sub), dec("8"));
        assert_eq!(gst(sub), dec("18"));
    }

    #[test]
    fn test_tax_handles_fractional_results() {
        assert_eq!(tax(dec("12.50"), 8), dec("1.00"));
        assert_eq!(tax(dec("1"), 18), dec("0.18"));
    }

    #[test]
    fn test_shipping_below_threshold_adds_flat_fee() {
        assert_eq!(
            total_with_shipping(dec("49.99"), dec("50"), dec("4.95")),
            dec("54.94")
        );
    }

    #[test]
    fn test_shipping_at_threshold_is_free() {
        assert_eq!(
            total_with_shipping(dec("50"), dec("50"), dec("4.95")),
            dec("50")
        );
        assert_eq!(
            total_with_shipping(dec("80"), dec("50"), dec("4.95")),
            dec("80")
        );
    }
}
