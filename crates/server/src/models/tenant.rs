//! Tenant domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoplane_core::{Product, TenantId};

use super::screen::ScreenConfig;

/// A tenant: one storefront deployment, identified by the opaque
/// `adminObjectId` clients send with every unauthenticated request.
///
/// The catalog and screen configuration live inside the tenant document
/// and are served verbatim; the API never mutates a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Opaque tenant identifier.
    pub id: TenantId,
    /// Storefront display name.
    pub store_name: String,
    /// Optional storefront tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// ISO 4217 currency code for display.
    pub currency_code: String,
    /// Cart value at which shipping becomes free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold.
    pub flat_shipping_fee: Decimal,
    /// Product catalog, served in stored order.
    pub products: Vec<Product>,
    /// Screen configuration for generated clients.
    pub screens: ScreenConfig,
    /// When the tenant was provisioned.
    pub created_at: DateTime<Utc>,
    /// When the tenant document was last written.
    pub updated_at: DateTime<Utc>,
}
