//! Shoplane Core - Shared domain library.
//!
//! This crate provides the domain types and arithmetic used by the Shoplane
//! server:
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`catalog`] - Product listings and the effective-price rule
//! - [`line_item`] - Cart, wishlist, and purchase-history line items
//! - [`pricing`] - Subtotal, tax, and shipping arithmetic
//! - [`order`] - Order references and order totals
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Everything here is deterministic and testable
//! without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod line_item;
pub mod order;
pub mod pricing;
pub mod types;

pub use catalog::Product;
pub use line_item::{CartLine, PurchaseRecord, WishlistEntry};
pub use types::*;
