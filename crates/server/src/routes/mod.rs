//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                      - Liveness probe
//! GET  /health/ready                                - Readiness probe (checks database)
//!
//! # Tenant configuration
//! GET  /api/get-screen-config?adminObjectId=&screen= - Screen field definitions
//! GET  /api/app-config/{adminObjectId}               - Store metadata + user count
//!
//! # Catalog
//! GET  /api/products/{adminObjectId}                 - Full catalog
//! GET  /api/products/search/{adminObjectId}/{query}  - Substring search
//!
//! # Users
//! POST /api/users/register                           - Create account, returns token
//! POST /api/users/login                              - Authenticate, returns token
//! POST /api/users/check                              - Is this email registered?
//!
//! # Account collections (bearer auth)
//! GET  /api/users/profile                            - Profile fields
//! GET|POST /api/users/cart                           - Read / mutate cart
//! GET|POST /api/users/wishlist                       - Read / mutate wishlist
//! GET|POST /api/users/orders                         - History / place order
//! ```
//!
//! All responses use the `{success, data?, error?}` envelope.

pub mod cart;
pub mod config;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the tenant configuration routes.
pub fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/get-screen-config", get(config::screen_config))
        .route("/app-config/{admin_object_id}", get(config::app_config))
}

/// Create the catalog routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{admin_object_id}", get(products::list))
        .route("/search/{admin_object_id}/{query}", get(products::search))
}

/// Create the user routes (registration, auth, and owned collections).
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/check", post(users::check))
        .route("/profile", get(users::profile))
        .route("/cart", get(cart::get_cart).post(cart::mutate_cart))
        .route(
            "/wishlist",
            get(wishlist::get_wishlist).post(wishlist::mutate_wishlist),
        )
        .route(
            "/orders",
            get(orders::order_history).post(orders::place_order),
        )
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(config_routes())
        .nest("/products", product_routes())
        .nest("/users", user_routes());

    Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
