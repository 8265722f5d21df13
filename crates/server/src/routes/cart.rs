//! Cart handlers.
//!
//! Mutations are a tagged `action` body and every response carries the
//! full updated cart, so the client can treat the server copy as truth
//! after each call.

use axum::{Json, extract::State};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoplane_core::{CartLine, ProductRef, pricing};

use crate::db::carts::CartRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::response::Envelope;
use crate::state::AppState;

/// Cart mutation request body.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
#[serde(rename_all_fields = "camelCase")]
pub enum CartMutation {
    /// Add a line; merges quantity if the product is already present.
    Add {
        product_ref: String,
        name: String,
        price: Decimal,
        #[serde(default)]
        quantity: Option<u32>,
    },
    /// Set the quantity of an existing line.
    Update { product_ref: String, quantity: u32 },
    /// Remove a line; absent lines are ignored.
    Remove { product_ref: String },
}

/// Cart contents plus the derived subtotal.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
}

impl CartView {
    fn from_items(items: Vec<CartLine>) -> Self {
        let subtotal = pricing::subtotal(&items);
        Self { items, subtotal }
    }
}

/// `GET /api/users/cart`
///
/// # Errors
///
/// Returns 401 without a valid token, `AppError::Database` on failure.
pub async fn get_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<CartView>>> {
    let items = CartRepository::new(state.pool()).items(user.user_id).await?;
    Ok(Json(Envelope::success(CartView::from_items(items))))
}

/// `POST /api/users/cart`
///
/// Applies one mutation and returns the updated cart.
///
/// # Errors
///
/// Returns 401 without a valid token, 404 when updating a line that is
/// not in the cart.
pub async fn mutate_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(mutation): Json<CartMutation>,
) -> Result<Json<Envelope<CartView>>> {
    let carts = CartRepository::new(state.pool());

    match mutation {
        CartMutation::Add {
            product_ref,
            name,
            price,
            quantity,
        } => {
            let line = CartLine {
                product_ref: ProductRef::new(product_ref),
                name,
                unit_price: price,
                quantity: quantity.unwrap_or(1),
                added_at: Utc::now(),
            };
            carts.add(user.user_id, &line).await?;
        }
        CartMutation::Update {
            product_ref,
            quantity,
        } => {
            carts
                .update_quantity(user.user_id, &ProductRef::new(product_ref), quantity)
                .await?;
        }
        CartMutation::Remove { product_ref } => {
            carts
                .remove(user.user_id, &ProductRef::new(product_ref))
                .await?;
        }
    }

    let items = carts.items(user.user_id).await?;
    Ok(Json(Envelope::success(CartView::from_items(items))))
}
