//! Catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use shoplane_core::{Product, TenantId};

use crate::error::Result;
use crate::response::Envelope;
use crate::services::CatalogService;
use crate::state::AppState;

/// `GET /api/products/{adminObjectId}`
///
/// Returns the tenant's catalog in stored order.
///
/// # Errors
///
/// Returns `AppError::Catalog` for an unknown tenant or database failure.
pub async fn list(
    State(state): State<AppState>,
    Path(admin_object_id): Path<String>,
) -> Result<Json<Envelope<Vec<Product>>>> {
    let tenant_id = TenantId::new(admin_object_id);
    let products = CatalogService::new(state.pool(), state.catalog_cache())
        .products(&tenant_id)
        .await?;

    Ok(Json(Envelope::success(products.as_ref().clone())))
}

/// `GET /api/products/search/{adminObjectId}/{query}`
///
/// Case-insensitive substring search over name and description.
///
/// # Errors
///
/// Returns `AppError::Catalog` for an unknown tenant or database failure.
pub async fn search(
    State(state): State<AppState>,
    Path((admin_object_id, query)): Path<(String, String)>,
) -> Result<Json<Envelope<Vec<Product>>>> {
    let tenant_id = TenantId::new(admin_object_id);
    let hits = CatalogService::new(state.pool(), state.catalog_cache())
        .search(&tenant_id, &query)
        .await?;

    Ok(Json(Envelope::success(hits)))
}
