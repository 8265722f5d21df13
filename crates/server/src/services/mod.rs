//! Business logic services.
//!
//! Services own validation and orchestration; repositories own SQL. Each
//! service borrows the pool and is constructed per request.

pub mod auth;
pub mod catalog;
pub mod checkout;

pub use auth::{AuthError, AuthService, TokenSigner};
pub use catalog::{CatalogCache, CatalogError, CatalogService};
pub use checkout::{CheckoutError, CheckoutService, Receipt};
