//! Catalog product listings.
//!
//! A tenant's catalog is an external, read-mostly document: the server
//! serves it verbatim and never mutates it. Products therefore carry their
//! wire representation directly (serde camelCase) instead of a separate
//! row type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductRef;

/// A product listing within a tenant's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque product reference (stable across the catalog's lifetime).
    pub product_ref: ProductRef,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// List price in the tenant's currency.
    pub price: Decimal,
    /// Optional discount price. A missing or non-positive value means no
    /// discount is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    /// Optional product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// The price a buyer actually pays: the discount price when one is set
    /// and positive, otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if discount > Decimal::ZERO => discount,
            _ => self.price,
        }
    }

    /// Case-insensitive substring match against name and description.
    ///
    /// `query` must already be lowercased by the caller; search loops
    /// lowercase it once instead of per product.
    #[must_use]
    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self.description.to_lowercase().contains(lowercase_query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(price: &str, discount: Option<&str>) -> Product {
        Product {
            product_ref: ProductRef::new("sku-1"),
            name: "Red Mug".to_owned(),
            description: "A bright red ceramic mug".to_owned(),
            price: price.parse().unwrap(),
            discount_price: discount.map(|d| d.parse().unwrap()),
            image_url: None,
        }
    }

    #[test]
    fn test_effective_price_without_discount() {
        assert_eq!(product("19.99", None).effective_price(), dec("19.99"));
    }

    #[test]
    fn test_effective_price_with_discount() {
        assert_eq!(
            product("19.99", Some("14.99")).effective_price(),
            dec("14.99")
        );
    }

    #[test]
    fn test_effective_price_ignores_zero_discount() {
        // A zero or negative discount price means "no discount", not "free".
        assert_eq!(product("19.99", Some("0")).effective_price(), dec("19.99"));
        assert_eq!(product("19.99", Some("-1")).effective_price(), dec("19.99"));
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let p = product("5", None);
        assert!(p.matches_query("red"));
        assert!(p.matches_query("mug"));
        assert!(p.matches_query("ceramic"));
        assert!(!p.matches_query("blue"));
    }

    #[test]
    fn test_serde_camel_case_wire_format() {
        let p = product("5", Some("4"));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["productRef"], "sku-1");
        assert_eq!(json["discountPrice"], "4");
        assert!(json.get("imageUrl").is_none());
    }
}
