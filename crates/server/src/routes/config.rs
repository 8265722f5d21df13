//! Tenant configuration handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoplane_core::TenantId;

use crate::db::tenants::TenantRepository;
use crate::error::{AppError, Result};
use crate::models::screen::ScreenField;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfigQuery {
    pub admin_object_id: String,
    pub screen: String,
}

/// `GET /api/get-screen-config?adminObjectId=&screen=`
///
/// Returns the field definitions for one named screen.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown tenant or an unknown
/// screen name.
pub async fn screen_config(
    State(state): State<AppState>,
    Query(query): Query<ScreenConfigQuery>,
) -> Result<Json<Envelope<Vec<ScreenField>>>> {
    let tenant_id = TenantId::new(query.admin_object_id);
    let tenant = TenantRepository::new(state.pool())
        .get(&tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unknown store".to_owned()))?;

    let fields = tenant
        .screens
        .get(&query.screen)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("no screen named {}", query.screen)))?;

    Ok(Json(Envelope::success(fields)))
}

/// Store metadata served to clients at startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub store_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub currency_code: String,
    pub free_shipping_threshold: Decimal,
    pub flat_shipping_fee: Decimal,
    pub user_count: i64,
}

/// `GET /api/app-config/{adminObjectId}`
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown tenant.
pub async fn app_config(
    State(state): State<AppState>,
    Path(admin_object_id): Path<String>,
) -> Result<Json<Envelope<AppConfig>>> {
    let tenant_id = TenantId::new(admin_object_id);
    let tenants = TenantRepository::new(state.pool());

    let tenant = tenants
        .get(&tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unknown store".to_owned()))?;
    let user_count = tenants.user_count(&tenant_id).await?;

    Ok(Json(Envelope::success(AppConfig {
        store_name: tenant.store_name,
        tagline: tenant.tagline,
        currency_code: tenant.currency_code,
        free_shipping_threshold: tenant.free_shipping_threshold,
        flat_shipping_fee: tenant.flat_shipping_fee,
        user_count,
    })))
}
