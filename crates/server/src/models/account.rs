//! Account domain types.

use chrono::{DateTime, Utc};

use shoplane_core::{Email, TenantId, UserId};

/// A registered end user, scoped to exactly one tenant.
///
/// The password hash is deliberately not part of the domain type; the
/// repository exposes it only through the login lookup.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: UserId,
    /// Tenant the account belongs to. Cross-tenant lookups never happen.
    pub tenant_id: TenantId,
    /// Email address, unique within the tenant.
    pub email: Email,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account (including its collections) was last modified.
    pub updated_at: DateTime<Utc>,
}
