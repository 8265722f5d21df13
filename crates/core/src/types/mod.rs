//! Newtype wrappers shared across Shoplane crates.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{OrderRef, ProductRef, TenantId, UserId};
