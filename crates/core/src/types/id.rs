//! Newtype IDs for type-safe entity references.
//!
//! Tenant and product identifiers are opaque strings chosen by whoever
//! provisions the storefront, so the wrappers here guard a `String` rather
//! than an integer. Use the `define_str_id!` macro to create new ones.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use shoplane_core::define_str_id;
/// define_str_id!(WarehouseId);
///
/// let id = WarehouseId::new("wh-east-1");
/// assert_eq!(id.as_str(), "wh-east-1");
/// ```
#[macro_export]
macro_rules! define_str_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// The tenant scope (`adminObjectId` on the wire) partitioning all data
// for one storefront deployment.
define_str_id!(TenantId);

// A product reference within a catalog, cart, or wishlist.
define_str_id!(ProductRef);

// A generated order identifier (`ORDER_<ms-timestamp>`).
define_str_id!(OrderRef);

/// A user (account) identifier.
///
/// Unlike tenants and products, accounts are created by this system, so
/// their IDs are generated UUIDs rather than opaque external strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random user ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse a user ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns `uuid::Error` if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_str_id_roundtrip() {
        let tenant = TenantId::new("64f0c2ab91");
        assert_eq!(tenant.as_str(), "64f0c2ab91");
        assert_eq!(format!("{tenant}"), "64f0c2ab91");
    }

    #[test]
    fn test_str_id_serde_transparent() {
        let product = ProductRef::new("sku-42");
        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(json, "\"sku-42\"");

        let parsed: ProductRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }

    #[test]
    fn test_str_ids_are_distinct_types() {
        // TenantId and ProductRef share a representation but not a type;
        // equality across them does not compile. Spot-check the values.
        let tenant = TenantId::new("x");
        let product = ProductRef::new("x");
        assert_eq!(tenant.as_str(), product.as_str());
    }

    #[test]
    fn test_user_id_parse_roundtrip() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_user_id_parse_rejects_garbage() {
        assert!(UserId::parse("not-a-uuid").is_err());
    }
}
