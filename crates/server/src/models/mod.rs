//! Domain models for the server.
//!
//! These types represent validated domain objects separate from database
//! row types; the `db` layer converts rows into them.

pub mod account;
pub mod screen;
pub mod tenant;

pub use account::Account;
pub use screen::{ScreenConfig, ScreenField};
pub use tenant::Tenant;
