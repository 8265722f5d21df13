//! Order handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use shoplane_core::PurchaseRecord;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::response::Envelope;
use crate::services::CheckoutService;
use crate::state::AppState;

/// Receipt returned after checkout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: String,
    pub total: Decimal,
}

/// `GET /api/users/orders`
///
/// Purchase history, newest first.
///
/// # Errors
///
/// Returns 401 without a valid token, `AppError::Database` on failure.
pub async fn order_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<Vec<PurchaseRecord>>>> {
    let history = OrderRepository::new(state.pool())
        .history(user.user_id)
        .await?;
    Ok(Json(Envelope::success(history)))
}

/// `POST /api/users/orders`
///
/// Places an order from the current cart: every line moves to purchase
/// history and the cart is emptied atomically.
///
/// # Errors
///
/// Returns 401 without a valid token, 400 if the cart is empty.
pub async fn place_order(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<OrderPlaced>>> {
    let receipt = CheckoutService::new(state.pool())
        .place_order(user.user_id)
        .await?;

    Ok(Json(Envelope::success(OrderPlaced {
        order_id: receipt.order_ref.into_inner(),
        total: receipt.total,
    })))
}
