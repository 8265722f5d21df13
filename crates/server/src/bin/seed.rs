//! Tenant seeding tool.
//!
//! Reads a tenant document from a JSON file and upserts it into the
//! configured database, creating the schema if needed:
//!
//! ```text
//! shoplane-seed seed/demo-tenant.json
//! ```
//!
//! Reseeding an existing tenant replaces its catalog and screen
//! configuration; accounts and their collections are untouched.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use shoplane_core::{Product, TenantId};
use shoplane_server::config::ServerConfig;
use shoplane_server::db::{self, tenants::TenantRepository};
use shoplane_server::models::screen::ScreenConfig;
use shoplane_server::models::tenant::Tenant;

/// Tenant document as authored in a seed file. Timestamps are assigned
/// at load time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedTenant {
    id: String,
    store_name: String,
    #[serde(default)]
    tagline: Option<String>,
    currency_code: String,
    free_shipping_threshold: Decimal,
    flat_shipping_fee: Decimal,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    screens: ScreenConfig,
}

impl SeedTenant {
    fn into_tenant(self) -> Tenant {
        let now = Utc::now();
        Tenant {
            id: TenantId::new(self.id),
            store_name: self.store_name,
            tagline: self.tagline,
            currency_code: self.currency_code,
            free_shipping_threshold: self.free_shipping_threshold,
            flat_shipping_fee: self.flat_shipping_fee,
            products: self.products,
            screens: self.screens,
            created_at: now,
            updated_at: now,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoplane_seed=info".into()),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: shoplane-seed <tenant.json>");
        process::exit(2);
    };

    if let Err(e) = run(&path).await {
        tracing::error!("seeding failed: {e}");
        process::exit(1);
    }
}

async fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let raw = std::fs::read_to_string(path)?;
    let seed: SeedTenant = serde_json::from_str(&raw)?;
    let tenant = seed.into_tenant();

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    TenantRepository::new(&pool).upsert(&tenant).await?;
    tracing::info!(
        tenant = tenant.id.as_str(),
        products = tenant.products.len(),
        "tenant seeded"
    );

    Ok(())
}
