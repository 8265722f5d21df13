//! Catalog service.
//!
//! Serves a tenant's product list and substring search over it. Catalogs
//! change only through reseeding, so lookups go through a short-lived
//! in-process cache keyed by tenant.

use std::sync::Arc;

use moka::future::Cache;
use sqlx::SqlitePool;
use thiserror::Error;

use shoplane_core::{Product, TenantId};

use crate::db::RepositoryError;
use crate::db::tenants::TenantRepository;

/// Cache type shared through application state.
pub type CatalogCache = Cache<TenantId, Arc<Vec<Product>>>;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Tenant ID does not match any provisioned storefront.
    #[error("unknown store")]
    UnknownTenant,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog service.
pub struct CatalogService<'a> {
    tenants: TenantRepository<'a>,
    cache: &'a CatalogCache,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, cache: &'a CatalogCache) -> Self {
        Self {
            tenants: TenantRepository::new(pool),
            cache,
        }
    }

    /// Get a tenant's full catalog, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownTenant` if the tenant does not
    /// exist, `CatalogError::Repository` on database failure.
    pub async fn products(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(cached) = self.cache.get(tenant_id).await {
            return Ok(cached);
        }

        let tenant = self
            .tenants
            .get(tenant_id)
            .await?
            .ok_or(CatalogError::UnknownTenant)?;

        let products = Arc::new(tenant.products);
        self.cache
            .insert(tenant_id.clone(), Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Case-insensitive substring search over name and description,
    /// preserving catalog order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::products`].
    pub async fn search(
        &self,
        tenant_id: &TenantId,
        query: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.products(tenant_id).await?;
        let needle = query.to_lowercase();

        Ok(products
            .iter()
            .filter(|p| p.matches_query(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use shoplane_core::ProductRef;

    use crate::db::create_in_memory_pool;
    use crate::models::tenant::Tenant;

    use super::*;

    fn cache() -> CatalogCache {
        Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(60))
            .build()
    }

    fn product(product_ref: &str, name: &str, description: &str) -> Product {
        Product {
            product_ref: ProductRef::new(product_ref),
            name: name.to_owned(),
            description: description.to_owned(),
            price: "10".parse().unwrap(),
            discount_price: None,
            image_url: None,
        }
    }

    async fn seed(pool: &SqlitePool, products: Vec<Product>) -> TenantId {
        let now = Utc::now();
        let tenant = Tenant {
            id: TenantId::new("tenant-1"),
            store_name: "Demo Store".to_owned(),
            tagline: None,
            currency_code: "USD".to_owned(),
            free_shipping_threshold: "50".parse().unwrap(),
            flat_shipping_fee: "4.95".parse().unwrap(),
            products,
            screens: crate::models::screen::ScreenConfig::new(),
            created_at: now,
            updated_at: now,
        };
        TenantRepository::new(pool).upsert(&tenant).await.unwrap();
        tenant.id
    }

    #[tokio::test]
    async fn test_products_served_in_stored_order() {
        let pool = create_in_memory_pool().await.unwrap();
        let tenant_id = seed(
            &pool,
            vec![
                product("sku-2", "Blue Mug", "ceramic"),
                product("sku-1", "Red Mug", "ceramic"),
            ],
        )
        .await;
        let cache = cache();
        let catalog = CatalogService::new(&pool, &cache);

        let products = catalog.products(&tenant_id).await.unwrap();
        assert_eq!(products[0].product_ref.as_str(), "sku-2");
        assert_eq!(products[1].product_ref.as_str(), "sku-1");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_order_preserving() {
        let pool = create_in_memory_pool().await.unwrap();
        let tenant_id = seed(
            &pool,
            vec![
                product("sku-1", "Red Mug", "a ceramic mug"),
                product("sku-2", "Desk Lamp", "warm light"),
                product("sku-3", "Travel Mug", "steel, MUG sized"),
            ],
        )
        .await;
        let cache = cache();
        let catalog = CatalogService::new(&pool, &cache);

        let hits = catalog.search(&tenant_id, "MUG").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].product_ref.as_str(), "sku-1");
        assert_eq!(hits[1].product_ref.as_str(), "sku-3");
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let pool = create_in_memory_pool().await.unwrap();
        let cache = cache();
        let catalog = CatalogService::new(&pool, &cache);

        let err = catalog.products(&TenantId::new("nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTenant));
    }

    #[tokio::test]
    async fn test_cache_serves_after_first_load() {
        let pool = create_in_memory_pool().await.unwrap();
        let tenant_id = seed(&pool, vec![product("sku-1", "Red Mug", "")]).await;
        let cache = cache();
        let catalog = CatalogService::new(&pool, &cache);

        catalog.products(&tenant_id).await.unwrap();
        assert!(cache.get(&tenant_id).await.is_some());
    }
}
