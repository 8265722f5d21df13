//! Wishlist handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use shoplane_core::{ProductRef, WishlistEntry};

use crate::db::wishlists::WishlistRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::response::Envelope;
use crate::state::AppState;

/// Wishlist mutation request body.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
#[serde(rename_all_fields = "camelCase")]
pub enum WishlistMutation {
    /// Add an entry; already-present products are left untouched.
    Add {
        product_ref: String,
        name: String,
        price: Decimal,
    },
    /// Remove an entry; absent entries are ignored.
    Remove { product_ref: String },
}

/// `GET /api/users/wishlist`
///
/// # Errors
///
/// Returns 401 without a valid token, `AppError::Database` on failure.
pub async fn get_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<Vec<WishlistEntry>>>> {
    let entries = WishlistRepository::new(state.pool())
        .entries(user.user_id)
        .await?;
    Ok(Json(Envelope::success(entries)))
}

/// `POST /api/users/wishlist`
///
/// Applies one mutation and returns the updated wishlist.
///
/// # Errors
///
/// Returns 401 without a valid token, `AppError::Database` on failure.
pub async fn mutate_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(mutation): Json<WishlistMutation>,
) -> Result<Json<Envelope<Vec<WishlistEntry>>>> {
    let wishlists = WishlistRepository::new(state.pool());

    match mutation {
        WishlistMutation::Add {
            product_ref,
            name,
            price,
        } => {
            let entry = WishlistEntry {
                product_ref: ProductRef::new(product_ref),
                name,
                unit_price: price,
                added_at: Utc::now(),
            };
            wishlists.add(user.user_id, &entry).await?;
        }
        WishlistMutation::Remove { product_ref } => {
            wishlists
                .remove(user.user_id, &ProductRef::new(product_ref))
                .await?;
        }
    }

    let entries = wishlists.entries(user.user_id).await?;
    Ok(Json(Envelope::success(entries)))
}
