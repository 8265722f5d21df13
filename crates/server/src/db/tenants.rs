//! Tenant repository for database operations.
//!
//! Tenants are read-mostly: the API only ever reads them, and the seed
//! binary writes them.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoplane_core::{Product, TenantId};

use super::{RepositoryError, parse_decimal};
use crate::models::screen::ScreenConfig;
use crate::models::tenant::Tenant;

/// Raw tenant row; JSON columns are parsed during conversion.
#[derive(sqlx::FromRow)]
struct TenantRow {
    id: String,
    store_name: String,
    tagline: Option<String>,
    currency_code: String,
    free_shipping_threshold: String,
    flat_shipping_fee: String,
    products: String,
    screens: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantRow {
    fn into_domain(self) -> Result<Tenant, RepositoryError> {
        let products: Vec<Product> = serde_json::from_str(&self.products).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product catalog JSON: {e}"))
        })?;
        let screens: ScreenConfig = serde_json::from_str(&self.screens).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid screen config JSON: {e}"))
        })?;

        Ok(Tenant {
            id: TenantId::new(self.id),
            store_name: self.store_name,
            tagline: self.tagline,
            currency_code: self.currency_code,
            free_shipping_threshold: parse_decimal(
                &self.free_shipping_threshold,
                "free_shipping_threshold",
            )?,
            flat_shipping_fee: parse_decimal(&self.flat_shipping_fee, "flat_shipping_fee")?,
            products,
            screens,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for tenant database operations.
pub struct TenantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TenantRepository<'a> {
    /// Create a new tenant repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a tenant by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a JSON or decimal
    /// column fails to parse.
    pub async fn get(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(
            r"
            SELECT id, store_name, tagline, currency_code,
                   free_shipping_threshold, flat_shipping_fee,
                   products, screens, created_at, updated_at
            FROM tenant
            WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TenantRow::into_domain).transpose()
    }

    /// Check whether a tenant exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: &TenantId) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM tenant WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Count the accounts registered under a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn user_count(&self, id: &TenantId) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM account WHERE tenant_id = ?1")
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(row.0)
    }

    /// Insert or replace a tenant document (seed path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    /// Returns `RepositoryError::DataCorruption` if the document cannot be
    /// serialized.
    pub async fn upsert(&self, tenant: &Tenant) -> Result<(), RepositoryError> {
        let products = serde_json::to_string(&tenant.products).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize catalog: {e}"))
        })?;
        let screens = serde_json::to_string(&tenant.screens).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize screens: {e}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO tenant (id, store_name, tagline, currency_code,
                                free_shipping_threshold, flat_shipping_fee,
                                products, screens, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                store_name = excluded.store_name,
                tagline = excluded.tagline,
                currency_code = excluded.currency_code,
                free_shipping_threshold = excluded.free_shipping_threshold,
                flat_shipping_fee = excluded.flat_shipping_fee,
                products = excluded.products,
                screens = excluded.screens,
                updated_at = excluded.updated_at
            ",
        )
        .bind(tenant.id.as_str())
        .bind(&tenant.store_name)
        .bind(tenant.tagline.as_deref())
        .bind(&tenant.currency_code)
        .bind(tenant.free_shipping_threshold.to_string())
        .bind(tenant.flat_shipping_fee.to_string())
        .bind(products)
        .bind(screens)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
